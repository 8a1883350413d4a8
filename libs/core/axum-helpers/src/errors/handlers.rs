use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

use crate::envelope::ApiResponse;
use crate::errors::ErrorBody;

/// Handler for unmatched routes.
///
/// Used as the router fallback so unknown paths still answer with the
/// envelope instead of a bare 404.
pub async fn not_found() -> Response {
    let envelope = ApiResponse::<ErrorBody>::error_message(
        "The requested resource was not found",
        StatusCode::NOT_FOUND.as_u16(),
    );

    (StatusCode::NOT_FOUND, Json(envelope)).into_response()
}
