//! Application state management.
//!
//! Shared state passed to request handlers: configuration plus the
//! PostgreSQL connection pool. Cloning is cheap (Arc clones inside).

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
