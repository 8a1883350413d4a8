//! Centralized error translation.
//!
//! Every failure that crosses the HTTP boundary goes through exactly one
//! place: [`AppError::into_response`]. Handlers and extractors produce an
//! `AppError` (directly or via `From` conversions from domain errors) and
//! the translation renders the uniform error envelope with the right status
//! and [`ErrorCode`].

pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use std::collections::BTreeMap;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::envelope::{datetime_format, ApiResponse};

/// Structured error payload carried in the envelope's `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error_code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional per-field or contextual details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    /// When the error was produced
    #[serde(with = "datetime_format")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(
        error_code: ErrorCode,
        message: impl Into<String>,
        details: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            error_code,
            message: message.into(),
            details,
            timestamp: Utc::now(),
        }
    }
}

/// Application error type that renders the uniform error envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Request body field validation failed (validator constraint errors)
    #[error("request body validation failed")]
    Validation(ValidationErrors),

    /// Query/path parameter constraint violated
    #[error("parameter validation failed: {message}")]
    ParameterValidation {
        message: String,
        details: Option<BTreeMap<String, String>>,
    },

    /// Business-rule validation failed
    #[error("business rule validation failed: {message}")]
    CustomValidation {
        message: String,
        details: BTreeMap<String, String>,
    },

    /// Request body is not parseable JSON
    #[error("malformed JSON body: {0}")]
    MalformedJson(String),

    /// Parameter could not be parsed into its declared type
    #[error("parameter type mismatch: {0}")]
    TypeMismatch(String),

    /// Semantically inconsistent input
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// Referenced entity absent or inactive
    #[error("not found: {0}")]
    NotFound(String),

    /// State conflict (duplicate name)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convenience constructor for a single-field parameter violation.
    pub fn parameter(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut details = BTreeMap::new();
        details.insert(field.to_string(), message.clone());
        Self::ParameterValidation {
            message: format!("Parameter '{field}': {message}"),
            details: Some(details),
        }
    }
}

/// Flattens validator output into a field -> message map.
pub(crate) fn validation_details(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let message = errors
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| {
                    errors
                        .first()
                        .map(|e| e.code.to_string())
                        .unwrap_or_else(|| "invalid value".to_string())
                });
            (field.to_string(), message)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, details, envelope_message) = match self {
            AppError::Validation(errors) => {
                tracing::info!(error_code = %ErrorCode::ValidationError, "Validation error: {:?}", errors);
                (
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&errors)),
                    "Invalid request data",
                )
            }
            AppError::ParameterValidation { message, details } => {
                tracing::info!(error_code = %ErrorCode::ParameterValidationError, "Parameter validation error: {}", message);
                (
                    ErrorCode::ParameterValidationError,
                    message,
                    details,
                    "Invalid parameters",
                )
            }
            AppError::CustomValidation { message, details } => {
                tracing::info!(error_code = %ErrorCode::CustomValidationError, "Business rule violation: {}", message);
                (
                    ErrorCode::CustomValidationError,
                    message,
                    Some(details),
                    "Validation error",
                )
            }
            AppError::MalformedJson(detail) => {
                tracing::info!(error_code = %ErrorCode::MalformedJson, "Malformed JSON body: {}", detail);
                let mut details = BTreeMap::new();
                details.insert(
                    "suggestion".to_string(),
                    "Check the JSON syntax of the request body".to_string(),
                );
                (
                    ErrorCode::MalformedJson,
                    ErrorCode::MalformedJson.default_message().to_string(),
                    Some(details),
                    "Invalid JSON format",
                )
            }
            AppError::TypeMismatch(detail) => {
                tracing::info!(error_code = %ErrorCode::TypeMismatchError, "Type mismatch: {}", detail);
                (
                    ErrorCode::TypeMismatchError,
                    detail,
                    None,
                    "Invalid parameter type",
                )
            }
            AppError::IllegalArgument(detail) => {
                tracing::info!(error_code = %ErrorCode::IllegalArgument, "Illegal argument: {}", detail);
                let mut details = BTreeMap::new();
                details.insert(
                    "suggestion".to_string(),
                    "Check the values sent in the request".to_string(),
                );
                (
                    ErrorCode::IllegalArgument,
                    detail,
                    Some(details),
                    "Invalid argument",
                )
            }
            AppError::NotFound(detail) => {
                tracing::info!(error_code = %ErrorCode::ProductNotFound, "Not found: {}", detail);
                (
                    ErrorCode::ProductNotFound,
                    detail,
                    None,
                    "Resource not found",
                )
            }
            AppError::Conflict(detail) => {
                tracing::info!(error_code = %ErrorCode::ProductAlreadyExists, "Conflict: {}", detail);
                let mut details = BTreeMap::new();
                details.insert(
                    "suggestion".to_string(),
                    "Use a different name or update the existing product".to_string(),
                );
                (
                    ErrorCode::ProductAlreadyExists,
                    detail,
                    Some(details),
                    "Resource conflict",
                )
            }
            AppError::Internal(detail) => {
                // Full detail goes to the log; the response stays generic.
                tracing::error!(error_code = %ErrorCode::InternalServerError, "Internal error: {}", detail);
                (
                    ErrorCode::InternalServerError,
                    ErrorCode::InternalServerError.default_message().to_string(),
                    None,
                    "Internal server error",
                )
            }
        };

        let status = code.status();
        let body = ErrorBody::new(code, message, details);
        let envelope = ApiResponse::failure(body, envelope_message, status.as_u16());

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_envelope() {
        let response = AppError::NotFound("Product not found with ID: 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["data"]["errorCode"], "PRODUCT_NOT_FOUND");
        assert_eq!(json["data"]["message"], "Product not found with ID: 7");
    }

    #[tokio::test]
    async fn test_conflict_carries_suggestion_detail() {
        let response = AppError::Conflict("A product named 'Laptop' already exists".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body_json(response).await;
        assert_eq!(json["data"]["errorCode"], "PRODUCT_ALREADY_EXISTS");
        assert!(json["data"]["details"]["suggestion"]
            .as_str()
            .unwrap()
            .contains("different name"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = AppError::Internal("pool exhausted on shard 3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["data"]["errorCode"], "INTERNAL_SERVER_ERROR");
        assert!(!json["data"]["message"]
            .as_str()
            .unwrap()
            .contains("shard"));
    }

    #[tokio::test]
    async fn test_parameter_helper_builds_details() {
        let response = AppError::parameter("id", "must be greater than or equal to 1").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["data"]["errorCode"], "PARAMETER_VALIDATION_ERROR");
        assert_eq!(
            json["data"]["details"]["id"],
            "must be greater than or equal to 1"
        );
    }
}
