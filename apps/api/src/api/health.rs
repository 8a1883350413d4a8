use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use serde_json::Value;

use crate::state::AppState;

/// Readiness probe: verifies the database connection is usable.
pub async fn ready_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let db = state.db.clone();

    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async move {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
