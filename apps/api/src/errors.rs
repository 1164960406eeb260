#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gen_client::GenerationError;
use crate::render::RenderError;
use crate::store::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Reserved for finer-grained authorization. Ownership misses are
    /// reported as `NotFound` so existence never leaks.
    #[error("Forbidden")]
    Forbidden,

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The provider call succeeded but the final write failed. The generated
    /// text is carried in the payload so it is not silently lost — there is
    /// no outbox or retry queue to recover it from.
    #[error("Storage error after successful generation: {source}")]
    StorageAfterGeneration {
        text: String,
        source: StorageError,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                error_body("NOT_FOUND", msg),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                error_body("VALIDATION_ERROR", msg),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                error_body("UNAUTHORIZED", "Authentication required"),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                error_body("FORBIDDEN", "Access denied"),
            ),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": {
                            "code": "GENERATION_FAILED",
                            "message": e.to_string(),
                            "transient": e.is_transient(),
                            "reason": e.reason(),
                        }
                    }),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("STORAGE_ERROR", "A storage error occurred"),
                )
            }
            AppError::StorageAfterGeneration { text, source } => {
                tracing::error!("Storage error after generation: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": {
                            "code": "STORAGE_ERROR",
                            "message": "Generation succeeded but the result could not be saved",
                            "generated_text": text,
                        }
                    }),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("RENDER_ERROR", "Document rendering failed"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("INTERNAL_ERROR", "An internal server error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(code: &str, message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}
