use crate::errors::{AppError, validation::from_deserialize_error};
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

/// Query-string extractor with the same error shape as [`ValidatedJson`](super::ValidatedJson).
///
/// Every parameter arrives as a JSON string; numeric fields should use
/// [`coerce::optional_i64`](super::coerce::optional_i64). When a key repeats,
/// the last value wins.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();

        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|e| AppError::invalid_field("querystring", e.to_string()))?;

        let object: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        let data: T = serde_path_to_error::deserialize(Value::Object(object))
            .map_err(|e| AppError::Validation(from_deserialize_error(e)))?;

        data.validate()?;

        Ok(ValidatedQuery(data))
    }
}
