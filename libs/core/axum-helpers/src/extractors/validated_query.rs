//! Query-string extractor with automatic validation.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Query extractor with automatic validation.
///
/// A query string that fails to deserialize (missing required parameter,
/// unparseable number) is reported as `TYPE_MISMATCH_ERROR`; deserialized
/// values that violate their `Validate` constraints are reported as
/// `PARAMETER_VALIDATION_ERROR` with per-field details.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::TypeMismatch(e.body_text()).into_response())?;

        params.validate().map_err(|e| {
            AppError::ParameterValidation {
                message: "Validation failed for request parameters".to_string(),
                details: Some(crate::errors::validation_details(&e)),
            }
            .into_response()
        })?;

        Ok(ValidatedQuery(params))
    }
}
