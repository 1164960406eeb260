pub mod health;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;

use crate::artifacts::handlers as artifact_handlers;
use crate::documents::handlers as document_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route(
            "/api/v1/documents",
            post(document_handlers::handle_create_document)
                .get(document_handlers::handle_list_documents),
        )
        .route(
            "/api/v1/documents/:id",
            get(document_handlers::handle_get_document)
                .put(document_handlers::handle_update_document)
                .delete(document_handlers::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/text",
            delete(document_handlers::handle_clear_generated_text),
        )
        .route(
            "/api/v1/documents/:id/download",
            get(document_handlers::handle_download_document),
        )
        .route(
            "/api/v1/documents/:id/generate",
            post(artifact_handlers::handle_generate),
        )
        // Artifact API
        .route(
            "/api/v1/artifacts",
            get(artifact_handlers::handle_list_artifacts),
        )
        .route(
            "/api/v1/artifacts/:id",
            get(artifact_handlers::handle_get_artifact)
                .delete(artifact_handlers::handle_delete_artifact),
        )
        .route(
            "/api/v1/artifacts/:id/download",
            get(artifact_handlers::handle_download_artifact),
        )
        .with_state(state)
}

/// Wraps PDF bytes in an attachment response with a timestamped filename.
pub fn pdf_attachment(prefix: &str, bytes: Vec<u8>) -> Response {
    let filename = format!("{}-{}.pdf", prefix, Utc::now().timestamp_millis());
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
