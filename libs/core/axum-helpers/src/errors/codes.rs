//! Numeric error codes attached to error logs.
//!
//! Response bodies stay `{message}`; the codes only appear as the
//! `error_code` field of the tracing events emitted by [`super::AppError`],
//! so dashboards can group failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::ValidationError.code(), 1001);
//! assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    ValidationError,
    NotFound,
    Conflict,
    RouteNotFound,
    /// Body could not be read (content type, size)
    RequestRejected,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Database errors (2000s)
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::RequestRejected => "REQUEST_REJECTED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::RouteNotFound => 1012,
            Self::RequestRejected => 1013,
            Self::DatabaseError => 2003,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_representations() {
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
        assert_eq!(ErrorCode::Conflict.to_string(), "CONFLICT");
        assert_eq!(
            serde_json::to_string(&ErrorCode::RouteNotFound).unwrap(),
            "\"ROUTE_NOT_FOUND\""
        );
    }
}
