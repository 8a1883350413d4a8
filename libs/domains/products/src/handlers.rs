use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        ParameterValidationResponse, ValidationErrorResponse,
    },
    ApiResponse, AppError, IdPath, PagedResponse, ValidatedJson, ValidatedQuery,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};
use validator::{Validate, ValidationError};

use crate::models::{
    CreateProduct, PageRequest, ProductDto, SortDirection, SortField, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "Products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        products_by_category,
        products_by_price_range,
        search_products,
        low_stock_products,
        update_product_stock,
    ),
    components(
        schemas(ProductDto, CreateProduct, UpdateProduct),
        responses(
            ValidationErrorResponse,
            ParameterValidationResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/category/{category}", get(products_by_category))
        .route("/price-range", get(products_by_price_range))
        .route("/search", get(search_products))
        .route("/low-stock", get(low_stock_products))
        .route("/{id}/stock", patch(update_product_stock))
        .with_state(shared_service)
}

fn default_size() -> i64 {
    20
}

fn default_sort() -> String {
    "id".to_string()
}

fn default_direction() -> String {
    "asc".to_string()
}

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListParams {
    /// Page number (0-based)
    #[serde(default)]
    #[validate(range(min = 0, message = "Page index must not be negative"))]
    #[param(example = 0)]
    pub page: i64,

    /// Page size
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    #[param(example = 20)]
    pub size: i64,

    /// Sort field (id, name, price, category, stock, createdAt, updatedAt)
    #[serde(default = "default_sort")]
    #[param(example = "name")]
    pub sort: String,

    /// Sort direction; "desc" (case-insensitive) selects descending
    #[serde(default = "default_direction")]
    #[param(example = "asc")]
    pub direction: String,

    /// When true, returns a flat array without pagination
    #[serde(default)]
    pub unpaged: bool,
}

fn validate_non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_price")
            .with_message("Price must not be negative".into()));
    }
    Ok(())
}

/// Query parameters for the price-range endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeParams {
    /// Lower price bound (inclusive)
    #[validate(custom(function = "validate_non_negative_price"))]
    #[param(value_type = f64, example = 100.00)]
    pub min_price: Decimal,

    /// Upper price bound (inclusive)
    #[validate(custom(function = "validate_non_negative_price"))]
    #[param(value_type = f64, example = 1000.00)]
    pub max_price: Decimal,
}

/// Query parameters for the name search endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct SearchParams {
    /// Fragment to look for in product names
    #[param(example = "laptop")]
    pub name: String,
}

/// Query parameters for the low-stock endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LowStockParams {
    /// Stock threshold (exclusive upper bound)
    #[validate(range(min = 0, message = "Stock threshold must not be negative"))]
    #[param(example = 10)]
    pub min_stock: i32,
}

/// Query parameters for the stock update endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct StockParams {
    /// New stock value
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[param(example = 25)]
    pub stock: i32,
}

/// List products, paged by default or flat with `unpaged=true`
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<PagedResponse<ProductDto>>),
        (status = 400, response = ParameterValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Response, AppError> {
    if params.unpaged {
        let products = service.list_products().await?;
        let dtos: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

        return Ok(Json(ApiResponse::success(
            dtos,
            "Products retrieved successfully",
        ))
        .into_response());
    }

    let sort = params.sort.parse::<SortField>().map_err(|_| {
        AppError::parameter("sort", format!("Unknown sort field '{}'", params.sort))
    })?;

    let request = PageRequest {
        page: params.page as u64,
        size: params.size as u64,
        sort,
        direction: SortDirection::from_param(&params.direction),
    };

    let page = service.list_products_page(request).await?;
    let content: Vec<ProductDto> = page.content.into_iter().map(Into::into).collect();
    let paged = PagedResponse::new(content, page.page_number, page.page_size, page.total_elements);

    Ok(Json(ApiResponse::success(
        paged,
        "Paged products retrieved successfully",
    ))
    .into_response())
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id", minimum = 1)
    ),
    responses(
        (status = 200, description = "Product found successfully", body = ApiResponse<ProductDto>),
        (status = 400, response = ParameterValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    let product = service.get_product(id).await?;

    Ok(Json(ApiResponse::success(
        ProductDto::from(product),
        "Product found successfully",
    ))
    .into_response())
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductDto>),
        (status = 400, response = ValidationErrorResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<Response, AppError> {
    let product = service.create_product(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            ProductDto::from(product),
            "Product created successfully",
        )),
    )
        .into_response())
}

/// Replace every writable field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id", minimum = 1)
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductDto>),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<Response, AppError> {
    let product = service.update_product(id, input).await?;

    Ok(Json(ApiResponse::success(
        ProductDto::from(product),
        "Product updated successfully",
    ))
    .into_response())
}

/// Soft-delete a product (marks it inactive)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id", minimum = 1)
    ),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 400, response = ParameterValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    service.delete_product(id).await?;

    Ok(Json(ApiResponse::<ProductDto>::success_empty(
        "Product deleted successfully",
    ))
    .into_response())
}

/// List products in a category (case-insensitive)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Products found for the category", body = ApiResponse<Vec<ProductDto>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> Result<Response, AppError> {
    let products = service.products_by_category(&category).await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        dtos,
        format!("Products found for category: {}", category),
    ))
    .into_response())
}

/// List products within an inclusive price range
#[utoipa::path(
    get,
    path = "/price-range",
    tag = TAG,
    params(PriceRangeParams),
    responses(
        (status = 200, description = "Products found in the price range", body = ApiResponse<Vec<ProductDto>>),
        (status = 400, response = ParameterValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_price_range<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PriceRangeParams>,
) -> Result<Response, AppError> {
    let products = service
        .products_by_price_range(params.min_price, params.max_price)
        .await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        dtos,
        format!(
            "Products found in range ${} - ${}",
            params.min_price, params.max_price
        ),
    ))
    .into_response())
}

/// Search products by name fragment (case-insensitive)
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Products found for the search", body = ApiResponse<Vec<ProductDto>>),
        (status = 400, response = ParameterValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> Result<Response, AppError> {
    let products = service.search_products_by_name(&params.name).await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        dtos,
        format!("Products found for search: {}", params.name),
    ))
    .into_response())
}

/// List products with stock below a threshold
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = TAG,
    params(LowStockParams),
    responses(
        (status = 200, description = "Products with low stock", body = ApiResponse<Vec<ProductDto>>),
        (status = 400, response = ParameterValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn low_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(params): ValidatedQuery<LowStockParams>,
) -> Result<Response, AppError> {
    let products = service.products_with_low_stock(params.min_stock).await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        dtos,
        format!("Products with stock below {}", params.min_stock),
    ))
    .into_response())
}

/// Update only the stock of a product
#[utoipa::path(
    patch,
    path = "/{id}/stock",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id", minimum = 1),
        StockParams
    ),
    responses(
        (status = 200, description = "Stock updated successfully", body = ApiResponse<ProductDto>),
        (status = 400, response = ParameterValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedQuery(params): ValidatedQuery<StockParams>,
) -> Result<Response, AppError> {
    let product = service.update_stock(id, params.stock).await?;

    Ok(Json(ApiResponse::success(
        ProductDto::from(product),
        "Stock updated successfully",
    ))
    .into_response())
}
