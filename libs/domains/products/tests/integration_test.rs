//! Integration tests for the products domain
//!
//! These tests run against real PostgreSQL via testcontainers to ensure the
//! SeaORM queries behave like the in-memory implementation: active-row
//! filtering, case-insensitive matching, pagination totals, and timestamp
//! stamping.

use domain_products::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use test_utils::{assertions::*, TestDatabase, TestDataBuilder};

fn create(name: &str, price: &str, category: &str, stock: i32) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        description: None,
        price: Decimal::from_str(price).unwrap(),
        category: category.to_string(),
        stock,
    }
}

#[tokio::test]
async fn test_insert_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("insert_and_get");

    let name = builder.name("gadget", "main");
    let created = repo
        .insert(create(&name, "49.99", "Hogar", 12))
        .await
        .unwrap();

    assert!(created.id >= 1);
    assert!(created.active);
    assert_eq!(created.name, name);
    assert!(created.updated_at >= created.created_at);

    let retrieved = repo.find_active_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.price, Decimal::from_str("49.99").unwrap());
}

#[tokio::test]
async fn test_ids_are_monotonic() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("monotonic_ids");

    let first = repo
        .insert(create(&builder.name("gadget", "a"), "10.00", "Hogar", 1))
        .await
        .unwrap();
    let second = repo
        .insert(create(&builder.name("gadget", "b"), "10.00", "Hogar", 1))
        .await
        .unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_soft_deleted_rows_stay_in_table_but_leave_reads() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("soft_delete");

    let name = builder.name("gadget", "kept");
    let created = service
        .create_product(create(&name, "15.00", "Hogar", 4))
        .await
        .unwrap();

    service.delete_product(created.id).await.unwrap();

    // Invisible through the repository
    assert!(repo.find_active_by_id(created.id).await.unwrap().is_none());
    assert!(repo
        .find_active_by_name_contains(&name)
        .await
        .unwrap()
        .is_empty());

    // But still present in the underlying table
    use sea_orm::EntityTrait;
    let raw = domain_products::entity::Entity::find_by_id(created.id)
        .one(&db.connection())
        .await
        .unwrap();
    let raw = assert_some(raw, "row should still exist");
    assert!(!raw.active);
}

#[tokio::test]
async fn test_case_insensitive_name_uniqueness_across_service() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("unique_name");

    let name = builder.name("gadget", "dup");
    service
        .create_product(create(&name, "20.00", "Hogar", 2))
        .await
        .unwrap();

    let result = service
        .create_product(create(&name.to_uppercase(), "25.00", "Hogar", 2))
        .await;

    assert!(
        matches!(result, Err(ProductError::AlreadyExists(_))),
        "expected AlreadyExists, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_category_and_search_are_case_insensitive() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("case_insensitive");

    repo.insert(create(
        &builder.name("Lamp", "desk"),
        "30.00",
        "Iluminación",
        7,
    ))
    .await
    .unwrap();

    let by_category = repo.find_active_by_category("ILUMINACIóN").await.unwrap();
    assert_eq!(by_category.len(), 1);

    let by_name = repo.find_active_by_name_contains("LAMP").await.unwrap();
    assert_eq!(by_name.len(), 1);

    assert_eq!(repo.count_by_category("iluminación").await.unwrap(), 1);
}

#[tokio::test]
async fn test_price_range_is_inclusive() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("price_range");

    repo.insert(create(&builder.name("item", "low"), "10.00", "Hogar", 1))
        .await
        .unwrap();
    repo.insert(create(&builder.name("item", "mid"), "50.00", "Hogar", 1))
        .await
        .unwrap();
    repo.insert(create(&builder.name("item", "high"), "90.00", "Hogar", 1))
        .await
        .unwrap();

    let found = repo
        .find_active_by_price_range(
            Decimal::from_str("10.00").unwrap(),
            Decimal::from_str("50.00").unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_paged_listing_totals_and_sorting() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("paged_listing");

    for (suffix, price) in [("a", "30.00"), ("b", "10.00"), ("c", "20.00")] {
        repo.insert(create(
            &builder.name("item", suffix),
            price,
            "Hogar",
            1,
        ))
        .await
        .unwrap();
    }

    let page = repo
        .list_active_page(PageRequest {
            page: 0,
            size: 2,
            sort: SortField::Price,
            direction: SortDirection::Asc,
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].price, Decimal::from_str("10.00").unwrap());
    assert_eq!(page.content[1].price, Decimal::from_str("20.00").unwrap());

    let last_page = repo
        .list_active_page(PageRequest {
            page: 1,
            size: 2,
            sort: SortField::Price,
            direction: SortDirection::Asc,
        })
        .await
        .unwrap();

    assert_eq!(last_page.content.len(), 1);
    assert_eq!(
        last_page.content[0].price,
        Decimal::from_str("30.00").unwrap()
    );
}

#[tokio::test]
async fn test_update_refreshes_updated_at() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("updated_at");

    let created = service
        .create_product(create(&builder.name("item", "x"), "10.00", "Hogar", 1))
        .await
        .unwrap();

    let updated = service.update_stock(created.id, 99).await.unwrap();

    assert_eq!(updated.stock, 99);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_stock_below_threshold_is_strict() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("stock_below");

    repo.insert(create(&builder.name("item", "ten"), "10.00", "Hogar", 10))
        .await
        .unwrap();
    repo.insert(create(&builder.name("item", "nine"), "10.00", "Hogar", 9))
        .await
        .unwrap();

    let found = repo.find_active_by_stock_below(10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].stock, 9);
}
