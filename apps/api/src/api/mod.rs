use axum::Router;

pub mod health;
pub mod products;

/// Creates the API routes without the `/api` prefix.
///
/// The `/api` prefix is added by the `create_router` helper. Sub-routers
/// have their state applied already, so the result is a stateless Router.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/v1/products", products::router(state))
}

/// Creates a router with the /ready endpoint that performs real checks.
///
/// Merged with the stateless app router; the /ready endpoint verifies the
/// database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
