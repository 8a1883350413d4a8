use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, PageRequest, Product, ProductPage, SortDirection, SortField};

/// Repository trait for product persistence.
///
/// Every read is restricted to active records; soft-deleted rows are
/// invisible through this interface. Name uniqueness is deliberately NOT
/// enforced here - that is the service layer's rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All active products
    async fn list_active(&self) -> ProductResult<Vec<Product>>;

    /// One page of active products plus the total active count
    async fn list_active_page(&self, request: PageRequest) -> ProductResult<ProductPage>;

    /// An active product by id
    async fn find_active_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Active products in a category (case-insensitive exact match)
    async fn find_active_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Active products with price in the inclusive range
    async fn find_active_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>>;

    /// Active products whose name contains the fragment (case-insensitive)
    async fn find_active_by_name_contains(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Active products with stock strictly below the threshold
    async fn find_active_by_stock_below(&self, threshold: i32) -> ProductResult<Vec<Product>>;

    /// Whether an active product other than `excluded_id` holds this name
    /// (case-insensitive)
    async fn exists_active_by_name_excluding(
        &self,
        name: &str,
        excluded_id: i64,
    ) -> ProductResult<bool>;

    /// Persist a new product: assigns the id and both timestamps
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Persist an existing product: refreshes the updated timestamp
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Number of active products in a category (case-insensitive)
    async fn count_by_category(&self, category: &str) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            // Ids start at 1; 0 stays reserved as the "no exclusion" sentinel
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn sorted(mut products: Vec<Product>, sort: SortField, direction: SortDirection) -> Vec<Product> {
        match sort {
            SortField::Id => products.sort_by_key(|p| p.id),
            SortField::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
            SortField::Price => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortField::Category => products.sort_by(|a, b| a.category.cmp(&b.category)),
            SortField::Stock => products.sort_by_key(|p| p.stock),
            SortField::CreatedAt => products.sort_by_key(|p| p.created_at),
            SortField::UpdatedAt => products.sort_by_key(|p| p.updated_at),
        }
        if direction == SortDirection::Desc {
            products.reverse();
        }
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_active(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| p.active).cloned().collect())
    }

    async fn list_active_page(&self, request: PageRequest) -> ProductResult<ProductPage> {
        let products = self.products.read().await;

        let active: Vec<Product> = products.values().filter(|p| p.active).cloned().collect();
        let total_elements = active.len() as u64;

        let sorted = Self::sorted(active, request.sort, request.direction);
        let content: Vec<Product> = sorted
            .into_iter()
            .skip((request.page * request.size) as usize)
            .take(request.size as usize)
            .collect();

        Ok(ProductPage {
            content,
            page_number: request.page,
            page_size: request.size,
            total_elements,
        })
    }

    async fn find_active_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| p.active).cloned())
    }

    async fn find_active_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.active && p.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect())
    }

    async fn find_active_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.active && p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    async fn find_active_by_name_contains(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let fragment = fragment.to_lowercase();
        Ok(products
            .values()
            .filter(|p| p.active && p.name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    async fn find_active_by_stock_below(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.active && p.stock < threshold)
            .cloned()
            .collect())
    }

    async fn exists_active_by_name_excluding(
        &self,
        name: &str,
        excluded_id: i64,
    ) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .any(|p| p.active && p.id != excluded_id && p.name.eq_ignore_ascii_case(name)))
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let now = Utc::now();
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            stock: input.stock,
            active: true,
            created_at: now,
            updated_at: now,
        };

        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        product.updated_at = Utc::now();
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn count_by_category(&self, category: &str) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.active && p.category.eq_ignore_ascii_case(category))
            .count() as u64)
    }
}
