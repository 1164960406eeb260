//! Request extractors whose rejections flow through [`AppError`].
//!
//! Axum's stock `Json`/`Query` rejections are plain-text responses; wrapping
//! them here keeps every boundary failure inside the structured
//! `{"error": {code, message}}` envelope.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Json<T>` whose rejection is a `VALIDATION_ERROR` envelope.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejection is a `VALIDATION_ERROR` envelope.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::response::IntoResponse;

    use crate::artifacts::handlers::GenerateQuery;
    use crate::models::document::DocumentContent;

    async fn query_error(uri: &str) -> AppError {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        ValidatedQuery::<GenerateQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn unknown_kind_is_a_validation_error() {
        let err = query_error("/api/v1/documents/x/generate?kind=resume").await;
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_kind_is_a_validation_error() {
        let err = query_error("/api/v1/documents/x/generate").await;
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let request = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let err = ValidatedJson::<DocumentContent>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn mis_tagged_body_is_a_validation_error() {
        let request = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"type": "letter", "personal_info": {"name": "Ada", "email": "a@b.com"}}"#,
            ))
            .unwrap();
        let err = ValidatedJson::<DocumentContent>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
