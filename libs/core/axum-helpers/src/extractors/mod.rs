//! Extractors that reject malformed input with a 422 before the handler runs.
//!
//! Every rejection is an [`AppError::Validation`](crate::AppError::Validation)
//! keyed by the field (or route parameter) the client got wrong.

pub mod coerce;
pub mod path;
pub mod validated_json;
pub mod validated_query;

pub use path::{IdPath, UuidPath};
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
