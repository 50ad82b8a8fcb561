//! JSON body extractor with field-level error reporting and `validator` checks.

use crate::errors::{
    AppError, FieldErrors,
    validation::{BODY_KEY, from_deserialize_error},
};
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// The body is parsed in three steps so every failure can be pinned to a field:
/// raw JSON, typed deserialization (wrong types, missing fields) and finally
/// `Validate` rules. Each step fails with a 422 [`AppError::Validation`].
///
/// Typed deserialization stops at the first mismatch, so only that field is
/// reported; `Validate` rules report every failing field at once.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateEvent {
///     #[serde(default)]
///     #[validate(length(min = 1, message = "Required"))]
///     title: String,
/// }
///
/// async fn create_event(ValidatedJson(payload): ValidatedJson<CreateEvent>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        let data: T = serde_path_to_error::deserialize(value)
            .map_err(|e| AppError::Validation(from_deserialize_error(e)))?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(e) => body_error(e.body_text()),
        JsonRejection::JsonDataError(e) => body_error(e.body_text()),
        other => AppError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}

fn body_error(message: String) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert(BODY_KEY.to_string(), vec![message]);
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request as HttpRequest, StatusCode}, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[serde(default)]
        #[validate(length(min = 1, message = "Required"))]
        title: String,
        #[validate(range(min = 0, message = "Number must be greater than or equal to 0"))]
        seats: Option<i32>,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.title
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(handler));
        let mut request = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let app = Router::new().route("/", post(handler));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"Rust Nation","seats":10}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Rust Nation");
    }

    #[tokio::test]
    async fn test_missing_title_is_reported_by_field() {
        let (status, body) = send(r#"{"seats":-1}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["errors"]["title"][0], "Required");
        assert_eq!(
            body["errors"]["seats"][0],
            "Number must be greater than or equal to 0"
        );
    }

    #[tokio::test]
    async fn test_wrong_type_is_reported_by_field() {
        let (status, body) = send(r#"{"title":7}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["title"][0].as_str().unwrap().contains("invalid type"));
    }

    #[tokio::test]
    async fn test_type_errors_stop_at_first_field() {
        let (status, body) = send(r#"{"title":7,"seats":"many"}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = body["errors"].as_object().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("title"));
    }

    #[tokio::test]
    async fn test_syntax_error_is_reported_on_body() {
        let (status, body) = send(r#"{"title":"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["body"].is_array());
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_rejection_status() {
        let (status, body) = send(r#"{"title":"x"}"#, None).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["message"].is_string());
    }
}
