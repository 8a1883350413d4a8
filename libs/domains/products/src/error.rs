use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with ID: {0}")]
    NotFound(i64),

    #[error("A product named '{0}' already exists")]
    AlreadyExists(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for the centralized envelope translation
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product not found with ID: {}", id))
            }
            ProductError::AlreadyExists(name) => {
                AppError::Conflict(format!("A product named '{}' already exists", name))
            }
            ProductError::Validation { message, errors } => AppError::CustomValidation {
                message,
                details: errors,
            },
            ProductError::InvalidArgument(msg) => AppError::IllegalArgument(msg),
            ProductError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        // Render through the shared translation for the uniform envelope
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
