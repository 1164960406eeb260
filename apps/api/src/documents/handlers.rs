//! Axum route handlers for source-document CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::models::document::{DocumentContent, DocumentRow};
use crate::render::render_pdf;
use crate::routes::pdf_attachment;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DocumentListResponse {
    pub count: usize,
    pub documents: Vec<DocumentRow>,
}

/// POST /api/v1/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(content): ValidatedJson<DocumentContent>,
) -> Result<(StatusCode, Json<DocumentRow>), AppError> {
    validate(&content)?;
    let document = state.store.create_document(user_id, content).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DocumentListResponse>, AppError> {
    let documents = state.store.list_documents(user_id).await?;
    Ok(Json(DocumentListResponse {
        count: documents.len(),
        documents,
    }))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRow>, AppError> {
    let document = state
        .store
        .get_document(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
    Ok(Json(document))
}

/// PUT /api/v1/documents/:id — full-document update.
pub async fn handle_update_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(content): ValidatedJson<DocumentContent>,
) -> Result<Json<DocumentRow>, AppError> {
    validate(&content)?;
    let document = state
        .store
        .update_document(user_id, id, content)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
    Ok(Json(document))
}

/// DELETE /api/v1/documents/:id
/// Generated artifacts are left in place; they outlive their source.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_document(user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Document {id} not found")))
    }
}

/// DELETE /api/v1/documents/:id/text
/// Clears the inline generated text, keeping the record.
pub async fn handle_clear_generated_text(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.clear_generated_text(user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Document {id} not found")))
    }
}

/// GET /api/v1/documents/:id/download
/// Streams the document's inline generated text (cover letters) as a PDF.
pub async fn handle_download_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let document = state
        .store
        .get_document(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

    let text = document.generated_text.as_deref().unwrap_or_default();
    let bytes = render_pdf(text, "cover-letter")?;
    Ok(pdf_attachment("cover-letter", bytes))
}

/// Boundary validation for create/update bodies.
fn validate(content: &DocumentContent) -> Result<(), AppError> {
    let info = content.personal_info();
    if info.name.trim().is_empty() {
        return Err(AppError::Validation("personal_info.name is required".into()));
    }
    if !info.email.contains('@') {
        return Err(AppError::Validation(
            "personal_info.email must be a valid email address".into(),
        ));
    }
    if let DocumentContent::CoverLetter(letter) = content {
        if letter.description.trim().is_empty() {
            return Err(AppError::Validation("description is required".into()));
        }
    }
    Ok(())
}
