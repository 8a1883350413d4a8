//! Integer id path parameter extractor with automatic validation.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// Extractor for numeric id path parameters.
///
/// Non-numeric values are reported as `TYPE_MISMATCH_ERROR`; ids below 1
/// as `PARAMETER_VALIDATION_ERROR`. Identifiers are server-assigned
/// starting at 1, so 0 never names a real record.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
/// ```
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::TypeMismatch(e.body_text()).into_response())?;

        let id: i64 = raw.parse().map_err(|_| {
            AppError::TypeMismatch(format!(
                "The parameter 'id' must be an integer, got '{raw}'"
            ))
            .into_response()
        })?;

        if id < 1 {
            return Err(
                AppError::parameter("id", "must be greater than or equal to 1").into_response(),
            );
        }

        Ok(IdPath(id))
    }
}
