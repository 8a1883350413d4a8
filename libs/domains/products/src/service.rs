use rust_decimal::Decimal;
use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PageRequest, Product, ProductPage};
use crate::repository::ProductRepository;
use crate::rules;

/// Sentinel passed to the name-existence check when no record should be
/// excluded. Ids are assigned starting at 1, so 0 never matches a real row;
/// if id assignment ever changed, this would silently stop excluding one.
const NO_EXCLUDED_ID: i64 = 0;

/// Service layer holding the product business rules.
///
/// Stateless apart from the repository handle; uniqueness of names,
/// soft deletion, and argument sanity all live here.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All active products, unsorted and unpaged
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        tracing::debug!("Listing all active products");
        self.repository.list_active().await
    }

    /// One page of active products
    pub async fn list_products_page(&self, request: PageRequest) -> ProductResult<ProductPage> {
        tracing::debug!(?request, "Listing active products page");
        self.repository.list_active_page(request).await
    }

    /// An active product by id
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        tracing::debug!(product_id = id, "Fetching product");
        self.repository
            .find_active_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a product.
    ///
    /// Enforces catalog policy and case-insensitive name uniqueness among
    /// active products. The check-then-insert pair is not atomic across
    /// concurrent requests.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        tracing::debug!(name = %input.name, "Creating product");

        rules::validate_for_creation(&input)?;

        if self
            .repository
            .exists_active_by_name_excluding(&input.name, NO_EXCLUDED_ID)
            .await?
        {
            return Err(ProductError::AlreadyExists(input.name));
        }

        let product = self.repository.insert(input).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Full update: overwrites every writable field.
    ///
    /// Fails when the record is absent/inactive, or when a changed name
    /// collides with another active product's name.
    pub async fn update_product(&self, id: i64, input: CreateProduct) -> ProductResult<Product> {
        tracing::debug!(product_id = id, "Updating product");

        let mut existing = self
            .repository
            .find_active_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if !existing.name.eq_ignore_ascii_case(&input.name)
            && self
                .repository
                .exists_active_by_name_excluding(&input.name, id)
                .await?
        {
            return Err(ProductError::AlreadyExists(input.name));
        }

        existing.name = input.name;
        existing.description = input.description;
        existing.price = input.price;
        existing.category = input.category;
        existing.stock = input.stock;

        let updated = self.repository.update(existing).await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(updated)
    }

    /// Soft delete: flips the active flag, never removes the row.
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        tracing::debug!(product_id = id, "Deleting product");

        let mut product = self
            .repository
            .find_active_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.active = false;
        self.repository.update(product).await?;

        tracing::info!(product_id = id, "Product marked inactive");
        Ok(())
    }

    /// Active products in a category (case-insensitive)
    pub async fn products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        tracing::debug!(category, "Listing products by category");
        self.repository.find_active_by_category(category).await
    }

    /// Active products with `min <= price <= max`
    pub async fn products_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>> {
        tracing::debug!(%min, %max, "Listing products by price range");

        if min > max {
            return Err(ProductError::InvalidArgument(
                "Minimum price cannot be greater than maximum price".to_string(),
            ));
        }

        self.repository.find_active_by_price_range(min, max).await
    }

    /// Active products whose name contains the fragment (case-insensitive)
    pub async fn search_products_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        tracing::debug!(fragment, "Searching products by name");
        self.repository.find_active_by_name_contains(fragment).await
    }

    /// Active products with stock strictly below the threshold
    pub async fn products_with_low_stock(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        tracing::debug!(threshold, "Listing products with low stock");
        self.repository.find_active_by_stock_below(threshold).await
    }

    /// Overwrite only the stock of a product.
    ///
    /// A negative value fails before any write happens.
    pub async fn update_stock(&self, id: i64, new_stock: i32) -> ProductResult<Product> {
        tracing::debug!(product_id = id, new_stock, "Updating product stock");

        let mut product = self
            .repository
            .find_active_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if new_stock < 0 {
            return Err(ProductError::InvalidArgument(
                "Stock cannot be negative".to_string(),
            ));
        }

        product.stock = new_stock;
        let updated = self.repository.update(product).await?;

        tracing::info!(product_id = id, new_stock, "Stock updated");
        Ok(updated)
    }

    /// Whether an active product with this id exists
    pub async fn product_exists(&self, id: i64) -> ProductResult<bool> {
        Ok(self.repository.find_active_by_id(id).await?.is_some())
    }

    /// Number of active products in a category
    pub async fn count_by_category(&self, category: &str) -> ProductResult<u64> {
        self.repository.count_by_category(category).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use std::str::FromStr;

    fn sample_product(id: i64, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::from_str("899.99").unwrap(),
            category: "Electrónicos".to_string(),
            stock: 50,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_create(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from_str("899.99").unwrap(),
            category: "Electrónicos".to_string(),
            stock: 50,
        }
    }

    #[tokio::test]
    async fn test_create_product_passes_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_active_by_name_excluding()
            .withf(|name, excluded| name == "Smartphone Pro" && *excluded == 0)
            .returning(|_, _| Ok(false));
        repo.expect_insert()
            .returning(|input| {
                let mut product = sample_product(1, "placeholder");
                product.name = input.name;
                Ok(product)
            });

        let service = ProductService::new(repo);
        let created = service.create_product(sample_create("Smartphone Pro")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Smartphone Pro");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_active_by_name_excluding()
            .returning(|_, _| Ok(true));
        // No insert expectation: reaching it would panic the test

        let service = ProductService::new(repo);
        let result = service.create_product(sample_create("Smartphone Pro")).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_with_forbidden_word_never_touches_repo() {
        let repo = MockProductRepository::new();

        let service = ProductService::new(repo);
        let result = service.create_product(sample_create("demo gadget")).await;

        assert!(matches!(result, Err(ProductError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .withf(|id| *id == 99)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.get_product(99).await;

        assert!(matches!(result, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_skips_collision_check() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Smartphone Pro"))));
        // Same name (different case): the exists check must not run
        repo.expect_update().returning(|product| Ok(product));

        let service = ProductService::new(repo);
        let updated = service
            .update_product(1, sample_create("SMARTPHONE PRO"))
            .await
            .unwrap();

        assert_eq!(updated.name, "SMARTPHONE PRO");
    }

    #[tokio::test]
    async fn test_update_to_colliding_name_conflicts() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Old Name"))));
        repo.expect_exists_active_by_name_excluding()
            .withf(|name, excluded| name == "Taken Name" && *excluded == 1)
            .returning(|_, _| Ok(true));

        let service = ProductService::new(repo);
        let result = service.update_product(1, sample_create("Taken Name")).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_flips_active_flag() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Smartphone Pro"))));
        repo.expect_update()
            .withf(|product| !product.active)
            .returning(|product| Ok(product));

        let service = ProductService::new(repo);
        service.delete_product(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_rejected_before_repo() {
        let repo = MockProductRepository::new();

        let service = ProductService::new(repo);
        let result = service
            .products_by_price_range(Decimal::from(100), Decimal::from(10))
            .await;

        assert!(matches!(result, Err(ProductError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_valid_price_range_passes_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_price_range()
            .returning(|_, _| Ok(vec![sample_product(1, "Smartphone Pro")]));

        let service = ProductService::new(repo);
        let found = service
            .products_by_price_range(Decimal::from(10), Decimal::from(1000))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_stock_never_mutates_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Smartphone Pro"))));
        // No update expectation: a write would panic the test

        let service = ProductService::new(repo);
        let result = service.update_stock(1, -5).await;

        assert!(matches!(result, Err(ProductError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_update_stock_overwrites_stock_only() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| Ok(Some(sample_product(id, "Smartphone Pro"))));
        repo.expect_update()
            .withf(|product| product.stock == 25 && product.name == "Smartphone Pro")
            .returning(|product| Ok(product));

        let service = ProductService::new(repo);
        let updated = service.update_stock(1, 25).await.unwrap();

        assert_eq!(updated.stock, 25);
    }

    #[tokio::test]
    async fn test_product_exists() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_active_by_id()
            .returning(|id| {
                if id == 1 {
                    Ok(Some(sample_product(1, "Smartphone Pro")))
                } else {
                    Ok(None)
                }
            });

        let service = ProductService::new(repo);
        assert!(service.product_exists(1).await.unwrap());
        assert!(!service.product_exists(2).await.unwrap());
    }
}
