//! Prometheus metrics for the pass-in API.
//!
//! - process-wide recorder installed once with [`init_metrics`]
//! - `/metrics` rendering via [`metrics_handler`]
//! - per-request counters and latency via [`middleware::metrics_middleware`]
//! - domain counters in [`RegistrationMetrics`]
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, RegistrationMetrics};
//!
//! init_metrics()?;
//! RegistrationMetrics::record_registration("success");
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod registrations;

pub use middleware::metrics_middleware;
pub use registrations::{OperationTimer, RegistrationMetrics};

pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `/metrics`.
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!("events_created_total", "Events created");
    describe_counter!(
        "attendee_registrations_total",
        "Attendee registration attempts by outcome"
    );
    describe_counter!("check_ins_total", "Check-in attempts by outcome");
    describe_histogram!(
        "repository_operation_duration_seconds",
        "Repository call duration in seconds by operation"
    );
}
