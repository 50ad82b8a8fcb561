use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(error_code = ErrorCode::RouteNotFound.code(), %uri, "Route not found");
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found"))).into_response()
}
