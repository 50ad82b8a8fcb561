//! Audit trail for state-changing requests.
//!
//! Events go to the `audit` tracing target so they can be routed separately
//! from request logs.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new("attendee.check_in", Some(format!("attendee:{}", id)), AuditOutcome::Success)
//!     .with_ip(extract_ip_from_headers(&headers))
//!     .with_user_agent(extract_user_agent(&headers))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// e.g. "event.create", "attendee.register"
    pub action: String,
    /// e.g. "event:0190…", "attendee:12"
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Attach client IP and user agent taken from request headers.
    pub fn with_request(self, headers: &HeaderMap) -> Self {
        self.with_ip(extract_ip_from_headers(headers))
            .with_user_agent(extract_user_agent(headers))
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            timestamp = %self.timestamp,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("203.0.113.7"));

        headers.remove("x-forwarded-for");
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn test_event_serializes_with_request_context() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("curl/8.5"));

        let event = AuditEvent::new("attendee.check_in", Some("attendee:12".into()), AuditOutcome::Success)
            .with_request(&headers)
            .with_details(serde_json::json!({ "event_id": "abc" }));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "attendee.check_in");
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["user_agent"], "curl/8.5");
        assert_eq!(json["details"]["event_id"], "abc");
        event.log();
    }
}
