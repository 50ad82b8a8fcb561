//! # Axum Helpers
//!
//! Building blocks shared by the HTTP services in this workspace.
//!
//! - **[`errors`]**: [`AppError`] and the `{message, errors?}` response body
//! - **[`extractors`]**: validated JSON / query / path extractors answering 422
//! - **[`server`]**: router assembly with OpenAPI UIs, health, graceful shutdown
//! - **[`http`]**: CORS, security headers, request origin
//! - **[`audit`]**: structured audit events
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes)?;
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, request_base_url, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrors};

pub use extractors::{IdPath, UuidPath, ValidatedJson, ValidatedQuery};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
