//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building the
//! catalog's Axum services.
//!
//! ## Modules
//!
//! - **[`envelope`]**: The uniform API response envelope and paged variant
//! - **[`errors`]**: Error codes and the centralized error-to-HTTP translation
//! - **[`extractors`]**: Custom extractors (integer id path, validated JSON/query)
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes);
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export envelope types
pub use envelope::{ApiResponse, PageMetadata, PagedResponse};

// Re-export error types
pub use errors::{AppError, ErrorBody, ErrorCode};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};

// Re-export HTTP middleware
pub use http::{create_permissive_cors_layer, security_headers};

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};
