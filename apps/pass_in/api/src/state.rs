//! Shared application state passed to the readiness handler and used to build
//! the domain services at startup.

/// Cloned per request; the connection is a pool handle, so clones share it.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
