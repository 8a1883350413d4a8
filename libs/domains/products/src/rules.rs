//! Business-rule validation applied on product creation.
//!
//! These rules sit above field-level validation: the input is structurally
//! valid but violates catalog policy. Violations surface as
//! `ProductError::Validation` and reach clients as CUSTOM_VALIDATION_ERROR.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{ProductError, ProductResult};
use crate::models::CreateProduct;

const FORBIDDEN_WORDS: [&str; 4] = ["test", "prueba", "demo", "temporal"];
const MAX_STOCK: i32 = 10_000;

fn max_price() -> Decimal {
    Decimal::from(100_000)
}

/// Validate catalog policy for a new product.
///
/// Collects every violation into a field -> message map so clients can fix
/// all of them in one round trip.
pub fn validate_for_creation(input: &CreateProduct) -> ProductResult<()> {
    let mut errors = BTreeMap::new();

    if contains_forbidden_word(&input.name) {
        errors.insert(
            "name".to_string(),
            "Product name cannot contain placeholder words like 'test' or 'demo'".to_string(),
        );
    }

    if input.price > max_price() {
        errors.insert(
            "price".to_string(),
            format!("Price cannot exceed ${}", max_price()),
        );
    }

    if input.stock > MAX_STOCK {
        errors.insert(
            "stock".to_string(),
            format!("Stock cannot exceed {} units", MAX_STOCK),
        );
    }

    check_price_category_coherence(input.price, &input.category, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProductError::Validation {
            message: "Business rule validation failed".to_string(),
            errors,
        })
    }
}

fn contains_forbidden_word(name: &str) -> bool {
    let lower_name = name.to_lowercase();
    FORBIDDEN_WORDS
        .iter()
        .any(|forbidden| lower_name.contains(forbidden))
}

/// Category-dependent price sanity checks.
fn check_price_category_coherence(
    price: Decimal,
    category: &str,
    errors: &mut BTreeMap<String, String>,
) {
    let lower_category = category.to_lowercase();

    if lower_category.contains("electr") && price < Decimal::from(50) {
        errors.insert(
            "price".to_string(),
            "Electronics must be priced at least $50.00".to_string(),
        );
    }

    if (lower_category.contains("libro") || lower_category.contains("book"))
        && price > Decimal::from(200)
    {
        errors.insert(
            "price".to_string(),
            "Books cannot be priced above $200.00".to_string(),
        );
    }

    if lower_category.contains("ropa") || lower_category.contains("cloth") {
        if price < Decimal::from(10) || price > Decimal::from(1_000) {
            errors.insert(
                "price".to_string(),
                "Clothing must be priced between $10.00 and $1,000.00".to_string(),
            );
        }
    }
}
