//! HTTP middleware module.
//!
//! CORS configuration and security headers applied by the router factory.

pub mod cors;
pub mod security;

pub use cors::create_permissive_cors_layer;
pub use security::security_headers;
