use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer.
///
/// Allows any origin with the common methods and headers. The API declares
/// no credentialed cross-origin flows, so the wildcard is acceptable here.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
