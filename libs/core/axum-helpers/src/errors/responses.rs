//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorBody;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - request body validation failed",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Invalid request data",
        "data": {
            "errorCode": "VALIDATION_ERROR",
            "message": "Validation failed for the submitted data",
            "details": {"name": "Name must be between 2 and 100 characters"},
            "timestamp": "2024-01-15 10:30:00"
        },
        "timestamp": "2024-01-15 10:30:00",
        "statusCode": 400
    })
)]
pub struct ValidationErrorResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid query or path parameter",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Invalid parameters",
        "data": {
            "errorCode": "PARAMETER_VALIDATION_ERROR",
            "message": "Parameter 'id': must be greater than or equal to 1",
            "details": {"id": "must be greater than or equal to 1"},
            "timestamp": "2024-01-15 10:30:00"
        },
        "timestamp": "2024-01-15 10:30:00",
        "statusCode": 400
    })
)]
pub struct ParameterValidationResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Product not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Resource not found",
        "data": {
            "errorCode": "PRODUCT_NOT_FOUND",
            "message": "Product not found with ID: 123",
            "timestamp": "2024-01-15 10:30:00"
        },
        "timestamp": "2024-01-15 10:30:00",
        "statusCode": 404
    })
)]
pub struct NotFoundResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Conflict - product name already in use",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Resource conflict",
        "data": {
            "errorCode": "PRODUCT_ALREADY_EXISTS",
            "message": "A product named 'Smartphone Pro' already exists",
            "details": {"suggestion": "Use a different name or update the existing product"},
            "timestamp": "2024-01-15 10:30:00"
        },
        "timestamp": "2024-01-15 10:30:00",
        "statusCode": 409
    })
)]
pub struct ConflictResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Internal server error",
        "data": {
            "errorCode": "INTERNAL_SERVER_ERROR",
            "message": "An unexpected internal error occurred",
            "timestamp": "2024-01-15 10:30:00"
        },
        "timestamp": "2024-01-15 10:30:00",
        "statusCode": 500
    })
)]
pub struct InternalServerErrorResponse(pub ErrorBody);
