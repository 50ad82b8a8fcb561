pub mod codes;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use validation::FieldErrors;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every 500 response; the underlying error only reaches the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Houston, we have a problem";
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

/// Error body returned by every endpoint.
///
/// ```json
/// { "message": "Validation error", "errors": { "title": ["Required"] } }
/// ```
///
/// `errors` is only present on 422 responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::HashMap<String, Vec<String>>>)]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            message: VALIDATION_ERROR_MESSAGE.to_string(),
            errors: Some(errors),
        }
    }
}

/// Application error type converted into an HTTP response at the boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Malformed input, keyed by the offending field.
    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request rejected before its body could be read, e.g. a missing content type.
    #[error("Rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation::from_validation_errors(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    fields = ?errors.keys().collect::<Vec<_>>(),
                    "Validation error"
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::validation(errors),
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg))
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(msg))
            }
            AppError::Rejected { status, message } => {
                tracing::warn!(
                    error_code = ErrorCode::RequestRejected.code(),
                    %status,
                    "Request rejected: {}",
                    message
                );
                (status, ErrorResponse::new(message))
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(msg))
            }
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_and_conflict_bodies_carry_only_the_message() {
        let (status, body) = render(AppError::NotFound("Event not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Event not found" }));

        let (status, body) = render(AppError::Conflict("Slug already in use".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": "Slug already in use" }));
    }

    #[tokio::test]
    async fn test_validation_body_lists_field_errors() {
        let (status, body) = render(AppError::invalid_field("title", "Required")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "message": "Validation error", "errors": { "title": ["Required"] } })
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_not_exposed() {
        let (status, body) = render(AppError::Database(DbErr::Custom(
            "password authentication failed".into(),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Houston, we have a problem" }));

        let (_, body) = render(AppError::InternalServerError("lock poisoned".into())).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }
}
