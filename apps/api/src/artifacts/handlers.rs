//! Axum route handlers for artifact generation, listing, and download.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifacts::service;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ValidatedQuery;
use crate::models::artifact::{ArtifactKind, ArtifactRef, ArtifactRow};
use crate::render::render_pdf;
use crate::routes::pdf_attachment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub kind: ArtifactKind,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactListQuery {
    pub document_id: Option<Uuid>,
    pub kind: Option<ArtifactKind>,
}

#[derive(Serialize)]
pub struct ArtifactListResponse {
    pub count: usize,
    pub artifacts: Vec<ArtifactRow>,
}

/// POST /api/v1/documents/:id/generate?kind=refined-resume|feedback|cover-letter-text
pub async fn handle_generate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(document_id): Path<Uuid>,
    ValidatedQuery(query): ValidatedQuery<GenerateQuery>,
) -> Result<Json<ArtifactRef>, AppError> {
    let artifact = service::produce_artifact(
        state.store.as_ref(),
        state.generator.as_ref(),
        &state.config,
        user_id,
        document_id,
        query.kind,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(artifact))
}

/// GET /api/v1/artifacts?document_id=&kind=
pub async fn handle_list_artifacts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedQuery(query): ValidatedQuery<ArtifactListQuery>,
) -> Result<Json<ArtifactListResponse>, AppError> {
    let artifacts =
        service::list_artifacts(state.store.as_ref(), user_id, query.document_id, query.kind)
            .await?;
    Ok(Json(ArtifactListResponse {
        count: artifacts.len(),
        artifacts,
    }))
}

/// GET /api/v1/artifacts/:id
pub async fn handle_get_artifact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtifactRow>, AppError> {
    let artifact = service::get_artifact(state.store.as_ref(), user_id, id).await?;
    Ok(Json(artifact))
}

/// DELETE /api/v1/artifacts/:id — removes the generated artifact only.
pub async fn handle_delete_artifact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete_artifact(state.store.as_ref(), user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/artifacts/:id/download — streams the artifact as a PDF.
pub async fn handle_download_artifact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let artifact = service::get_artifact(state.store.as_ref(), user_id, id).await?;

    let prefix = match artifact.kind.as_str() {
        "refined-resume" => "resume",
        other => other,
    };
    let bytes = render_pdf(&artifact.body, prefix)?;
    Ok(pdf_attachment(prefix, bytes))
}
