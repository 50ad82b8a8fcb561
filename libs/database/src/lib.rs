//! PostgreSQL connectivity shared by the API binary, the migration CLI and the
//! integration tests.
//!
//! - [`postgres`]: pool configuration, connection with retry, migrations, health checks
//! - [`constraint`]: classification of unique / foreign-key violations raised by SeaORM
//! - [`common`]: error type and retry with exponential backoff
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "pass_in_api").await?;
//! ```

pub mod common;
pub mod constraint;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
pub use constraint::{ConstraintViolation, constraint_violation};
