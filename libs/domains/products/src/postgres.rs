use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, PageRequest, Product, ProductPage, SortDirection, SortField},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository (SeaORM)
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active() -> Select<entity::Entity> {
        entity::Entity::find().filter(entity::Column::Active.eq(true))
    }

    fn db_error(e: sea_orm::DbErr) -> ProductError {
        ProductError::Internal(format!("Database error: {}", e))
    }
}

fn lowered(column: entity::Column) -> sea_orm::sea_query::SimpleExpr {
    Func::lower(Expr::col((entity::Entity, column))).into()
}

fn order_by(
    query: Select<entity::Entity>,
    sort: SortField,
    direction: SortDirection,
) -> Select<entity::Entity> {
    let column = match sort {
        SortField::Id => entity::Column::Id,
        SortField::Name => entity::Column::Name,
        SortField::Price => entity::Column::Price,
        SortField::Category => entity::Column::Category,
        SortField::Stock => entity::Column::Stock,
        SortField::CreatedAt => entity::Column::CreatedAt,
        SortField::UpdatedAt => entity::Column::UpdatedAt,
    };

    match direction {
        SortDirection::Asc => query.order_by_asc(column),
        SortDirection::Desc => query.order_by_desc(column),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_active(&self) -> ProductResult<Vec<Product>> {
        let models = Self::active()
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_active_page(&self, request: PageRequest) -> ProductResult<ProductPage> {
        let query = order_by(Self::active(), request.sort, request.direction);

        let paginator = query.paginate(&self.db, request.size);
        let total_elements = paginator.num_items().await.map_err(Self::db_error)?;
        let models = paginator
            .fetch_page(request.page)
            .await
            .map_err(Self::db_error)?;

        Ok(ProductPage {
            content: models.into_iter().map(Into::into).collect(),
            page_number: request.page,
            page_size: request.size,
            total_elements,
        })
    }

    async fn find_active_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = Self::active()
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(model.map(Into::into))
    }

    async fn find_active_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let models = Self::active()
            .filter(Expr::expr(lowered(entity::Column::Category)).eq(category.to_lowercase()))
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_active_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>> {
        let models = Self::active()
            .filter(entity::Column::Price.gte(min))
            .filter(entity::Column::Price.lte(max))
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_active_by_name_contains(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let pattern = format!("%{}%", fragment.to_lowercase());
        let models = Self::active()
            .filter(Expr::expr(lowered(entity::Column::Name)).like(pattern))
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_active_by_stock_below(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let models = Self::active()
            .filter(entity::Column::Stock.lt(threshold))
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_active_by_name_excluding(
        &self,
        name: &str,
        excluded_id: i64,
    ) -> ProductResult<bool> {
        let count = Self::active()
            .filter(entity::Column::Id.ne(excluded_id))
            .filter(Expr::expr(lowered(entity::Column::Name)).eq(name.to_lowercase()))
            .count(&self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(count > 0)
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(Self::db_error)?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = (&product).into();

        let model = active_model.update(&self.db).await.map_err(Self::db_error)?;

        tracing::info!(product_id = %model.id, "Updated product");
        Ok(model.into())
    }

    async fn count_by_category(&self, category: &str) -> ProductResult<u64> {
        Self::active()
            .filter(Expr::expr(lowered(entity::Column::Category)).eq(category.to_lowercase()))
            .count(&self.db)
            .await
            .map_err(Self::db_error)
    }
}
