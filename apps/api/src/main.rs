use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Connect to PostgreSQL, retrying while the database comes up
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    // Apply pending migrations at startup
    database::postgres::run_migrations::<migration::Migrator>(&db, "catalog_api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { config, db };

    // Build router with API routes (create_router adds docs/middleware)
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes);

    // Merge health endpoints into the app:
    // - /health: liveness check with app name/version
    // - /ready: readiness check hitting the database
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting catalog API with graceful shutdown (30s timeout)");

    let server_config = state.config.server.clone();

    // State moves into the cleanup future for connection shutdown
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");

        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
