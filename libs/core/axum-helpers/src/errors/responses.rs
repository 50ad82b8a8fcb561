//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "message": "Houston, we have a problem" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Validation Error",
    content_type = "application/json",
    example = json!({
        "message": "Validation error",
        "errors": {
            "title": ["Required"],
            "maximumAttendees": ["Number must be greater than or equal to 0"]
        }
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "message": "Event not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict with existing state",
    content_type = "application/json",
    example = json!({ "message": "Slug already in use" })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({ "message": "Database unavailable" })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
