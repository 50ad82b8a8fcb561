//! HTTP-level middleware and request helpers.

pub mod cors;
pub mod origin;
pub mod security;

pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use origin::request_base_url;
pub use security::security_headers;
