use axum_helpers::envelope::datetime_format;
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Letters and spaces only, accented Latin characters included
static CATEGORY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁ-ÿñÑ\s]+$").unwrap());

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if !CATEGORY_PATTERN.is_match(category) {
        return Err(ValidationError::new("invalid_category")
            .with_message("Category can only contain letters and spaces".into()));
    }
    Ok(())
}

fn validate_name_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(
            ValidationError::new("blank_name").with_message("Product name is required".into())
        );
    }
    Ok(())
}

/// Price must be positive, with at most 8 integer digits and 2 fraction digits.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price_positive")
            .with_message("Price must be greater than 0".into()));
    }
    let integer_digits = price.trunc().abs().to_string().len();
    if price.scale() > 2 || integer_digits > 8 {
        return Err(
            ValidationError::new("price_format").with_message("Invalid price format".into())
        );
    }
    Ok(())
}

/// Product entity - a catalog item.
///
/// `active = false` marks a logically deleted record; inactive products are
/// excluded from every read path.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Server-assigned identifier (monotonic, starts at 1)
    pub id: i64,
    /// Display name (unique among active products, case-insensitive)
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Unit price
    pub price: Decimal,
    /// Category name (letters and spaces)
    pub category: String,
    /// Units in stock
    pub stock: i32,
    /// Soft-delete flag
    pub active: bool,
    /// Set once at insertion
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Public response shape for a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Unique product id
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Smartphone Pro")]
    pub name: String,
    #[schema(example = "Latest generation smartphone")]
    pub description: Option<String>,
    /// Serialized as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 899.99)]
    pub price: Decimal,
    #[schema(example = "Electrónicos")]
    pub category: String,
    #[schema(example = 50)]
    pub stock: i32,
    pub active: bool,
    #[serde(with = "datetime_format")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "datetime_format")]
    #[schema(value_type = String, example = "2024-01-16 14:20:00")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// DTO for creating a product (also used as the full-replacement update body).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        custom(function = "validate_name_not_blank"),
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters")
    )]
    #[schema(example = "Smartphone Pro")]
    pub name: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 899.99)]
    pub price: Decimal,

    #[validate(custom(function = "validate_category"))]
    #[schema(example = "Electrónicos")]
    pub category: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 50)]
    pub stock: i32,
}

/// DTO for partial updates: only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64)]
    pub price: Option<Decimal>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

impl UpdateProduct {
    /// Whether any field would change
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.category.is_some()
            || self.stock.is_some()
    }

    /// Copy the populated fields onto an existing product.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Fields a product listing can be sorted by.
///
/// Parsed case-insensitively from the API parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Price,
    Category,
    Stock,
    CreatedAt,
    UpdatedAt,
}

/// Listing sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive "desc" selects descending, anything else ascending.
    pub fn from_param(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// A page request for the listing endpoint.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// Page number, 0-based
    pub page: u64,
    /// Page size, at least 1
    pub size: u64,
    pub sort: SortField,
    pub direction: SortDirection,
}

/// One page of products plus the total count across all pages.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub content: Vec<Product>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn valid_create() -> CreateProduct {
        CreateProduct {
            name: "Gaming Laptop".to_string(),
            description: Some("RTX 4070, 32GB RAM".to_string()),
            price: Decimal::from_str("2999.99").unwrap(),
            category: "Electrónicos".to_string(),
            stock: 15,
        }
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let mut input = valid_create();
        input.name = "   ".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_short_name_fails() {
        let mut input = valid_create();
        input.name = "x".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_name_at_length_bounds_passes() {
        let mut input = valid_create();
        input.name = "ab".to_string();
        assert!(input.validate().is_ok());

        input.name = "a".repeat(100);
        assert!(input.validate().is_ok());

        input.name = "a".repeat(101);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_description_over_500_fails() {
        let mut input = valid_create();
        input.description = Some("d".repeat(501));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_zero_price_fails() {
        let mut input = valid_create();
        input.price = Decimal::ZERO;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_price_with_three_decimals_fails() {
        let mut input = valid_create();
        input.price = Decimal::from_str("10.995").unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_price_with_nine_integer_digits_fails() {
        let mut input = valid_create();
        input.price = Decimal::from_str("123456789.00").unwrap();
        assert!(input.validate().is_err());

        input.price = Decimal::from_str("99999999.99").unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_category_with_digits_fails() {
        let mut input = valid_create();
        input.category = "Electr0nics".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
    }

    #[test]
    fn test_accented_category_passes() {
        let mut input = valid_create();
        input.category = "Electrónicos y más".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_stock_fails() {
        let mut input = valid_create();
        input.stock = -1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_sort_field_parses_case_insensitively() {
        assert_eq!("id".parse::<SortField>().unwrap(), SortField::Id);
        assert_eq!("PRICE".parse::<SortField>().unwrap(), SortField::Price);
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert_eq!("createdat".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert!("weight".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::from_param("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("sideways"), SortDirection::Asc);
    }

    #[test]
    fn test_update_apply_copies_only_populated_fields() {
        let mut product = Product {
            id: 1,
            name: "Original".to_string(),
            description: Some("Original description".to_string()),
            price: Decimal::from(100),
            category: "Hogar".to_string(),
            stock: 5,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let update = UpdateProduct {
            name: Some("Renamed".to_string()),
            stock: Some(9),
            ..Default::default()
        };
        assert!(update.has_updates());

        update.apply_to(&mut product);
        assert_eq!(product.name, "Renamed");
        assert_eq!(product.stock, 9);
        assert_eq!(product.description, Some("Original description".to_string()));
        assert_eq!(product.price, Decimal::from(100));
    }

    #[test]
    fn test_empty_update_has_no_updates() {
        assert!(!UpdateProduct::default().has_updates());
    }

    #[test]
    fn test_dto_serializes_camel_case_with_formatted_timestamps() {
        let product = Product {
            id: 7,
            name: "Desk Lamp".to_string(),
            description: None,
            price: Decimal::from_str("24.50").unwrap(),
            category: "Hogar".to_string(),
            stock: 3,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ProductDto::from(product)).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        let ts = json["createdAt"].as_str().unwrap();
        assert_eq!(ts.len(), 19);
    }
}
