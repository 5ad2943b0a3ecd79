//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": "..."}` JSON bodies with the
//! matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::registry::RegistryError;

/// Message returned for a phone that is already registered.
pub const DUPLICATE_GUEST_MESSAGE: &str = "el invitado ya existe";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Guest already registered (409)
    Conflict,

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Conflict => (StatusCode::CONFLICT, DUPLICATE_GUEST_MESSAGE.to_owned()),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "error interno".to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Validation(e) => Self::Validation(e),
            RegistryError::Duplicate { .. } => Self::Conflict,
            RegistryError::Storage(e) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::MissingField { field: "tipo" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "campo tipo es obligatorio"
        );
    }

    #[tokio::test]
    async fn duplicate_is_409() {
        let err: ApiError = RegistryError::Duplicate {
            phone: "5551234".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], DUPLICATE_GUEST_MESSAGE);
    }

    #[tokio::test]
    async fn storage_error_hides_details() {
        let err: ApiError =
            RegistryError::Storage(DbError::Sqlx(sqlx::Error::PoolTimedOut)).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "error interno");
    }
}
