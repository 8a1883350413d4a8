//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes the API can emit. Each code
//! carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - The HTTP status it maps to
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.status().as_u16(), 400);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body field validation failed
    ValidationError,

    /// Query or path parameter constraint violated
    ParameterValidationError,

    /// Business-rule validation failed
    CustomValidationError,

    /// Request body is not valid JSON
    MalformedJson,

    /// Query or path parameter has the wrong type
    TypeMismatchError,

    /// Semantically inconsistent input (e.g. inverted price range)
    IllegalArgument,

    /// Referenced product is absent or inactive
    ProductNotFound,

    /// Product name collides with an existing active product
    ProductAlreadyExists,

    /// Anything else
    InternalServerError,
}

impl ErrorCode {
    /// String representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ParameterValidationError => "PARAMETER_VALIDATION_ERROR",
            Self::CustomValidationError => "CUSTOM_VALIDATION_ERROR",
            Self::MalformedJson => "MALFORMED_JSON",
            Self::TypeMismatchError => "TYPE_MISMATCH_ERROR",
            Self::IllegalArgument => "ILLEGAL_ARGUMENT",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::ProductAlreadyExists => "PRODUCT_ALREADY_EXISTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// The HTTP status this code maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::ParameterValidationError
            | Self::CustomValidationError
            | Self::MalformedJson
            | Self::TypeMismatchError
            | Self::IllegalArgument => StatusCode::BAD_REQUEST,
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::ProductAlreadyExists => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed for the submitted data",
            Self::ParameterValidationError => "Validation failed for request parameters",
            Self::CustomValidationError => "Business rule validation failed",
            Self::MalformedJson => "The JSON request body is malformed",
            Self::TypeMismatchError => "A request parameter has the wrong type",
            Self::IllegalArgument => "An argument has an invalid value",
            Self::ProductNotFound => "Product not found",
            Self::ProductAlreadyExists => "Product already exists",
            Self::InternalServerError => "An unexpected internal error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(
            ErrorCode::ParameterValidationError.as_str(),
            "PARAMETER_VALIDATION_ERROR"
        );
        assert_eq!(ErrorCode::MalformedJson.as_str(), "MALFORMED_JSON");
        assert_eq!(ErrorCode::ProductNotFound.as_str(), "PRODUCT_NOT_FOUND");
        assert_eq!(
            ErrorCode::ProductAlreadyExists.as_str(),
            "PRODUCT_ALREADY_EXISTS"
        );
    }

    #[test]
    fn test_error_code_statuses() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::TypeMismatchError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::IllegalArgument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ProductAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::InternalServerError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_serialization_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::TypeMismatchError).unwrap();
        assert_eq!(json, "\"TYPE_MISMATCH_ERROR\"");

        let code: ErrorCode = serde_json::from_str("\"PRODUCT_NOT_FOUND\"").unwrap();
        assert_eq!(code, ErrorCode::ProductNotFound);
    }
}
