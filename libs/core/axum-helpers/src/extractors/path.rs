//! Single-parameter path extractors.
//!
//! Errors are keyed by the route's parameter name, so `/events/{eventId}`
//! rejects `not-a-uuid` with `{"errors": {"eventId": ["Invalid uuid"]}}`.

use super::coerce::parse_integer;
use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};
use uuid::Uuid;

pub const INVALID_UUID: &str = "Invalid uuid";

/// UUID path parameter.
///
/// # Example
/// ```ignore
/// async fn get_event(UuidPath(event_id): UuidPath) -> String {
///     event_id.to_string()
/// }
///
/// let app = Router::new().route("/events/{eventId}", get(get_event));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

/// 32-bit integer path parameter (serial primary keys). Numeric strings with
/// surrounding whitespace are accepted.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (name, value) = single_param(parts, state).await?;

        Uuid::parse_str(value.trim())
            .map(UuidPath)
            .map_err(|_| AppError::invalid_field(name, INVALID_UUID))
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (name, value) = single_param(parts, state).await?;

        let id = parse_integer(&value).map_err(|msg| AppError::invalid_field(name.clone(), msg))?;

        i32::try_from(id).map(IdPath).map_err(|_| {
            let bound = if id > 0 {
                format!("Number must be less than or equal to {}", i32::MAX)
            } else {
                format!("Number must be greater than or equal to {}", i32::MIN)
            };
            AppError::invalid_field(name, bound)
        })
    }
}

async fn single_param<S>(parts: &mut Parts, state: &S) -> Result<(String, String), AppError>
where
    S: Send + Sync,
{
    let params = RawPathParams::from_request_parts(parts, state)
        .await
        .map_err(|e| AppError::InternalServerError(e.body_text()))?;

    params
        .iter()
        .next()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| AppError::InternalServerError("route has no path parameter".to_string()))
}
