//! Database repository for the product catalog.
//!
//! Provides CRUD plus filtered, sorted, paginated listing.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{NewProduct, Product, ProductChanges, ProductId};
use crate::repositories::{ProductListQuery, ProductStore, StoreError};

const PRODUCT_COLUMNS: &str =
    "id, public_id, title, description, price, image, created_by, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO products (public_id, title, description, price, image, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(product.public_id.as_str())
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.image)
            .bind(&product.created_by)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_public_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE public_id = ?");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let sql = format!(
            r#"
            UPDATE products SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                image = COALESCE(?, image),
                updated_at = ?
            WHERE public_id = ?
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.price)
            .bind(&changes.image)
            .bind(Utc::now())
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let sql = format!("DELETE FROM products WHERE public_id = ? RETURNING {PRODUCT_COLUMNS}");
        let deleted = sqlx::query_as::<_, Product>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }

    async fn list(&self, query: &ProductListQuery) -> Result<(Vec<Product>, u64), StoreError> {
        // Sort column and direction come from a closed enum, so interpolating
        // them is safe; everything user-supplied goes through binds. The row
        // id tiebreak keeps pages stable when timestamps collide.
        let order = format!(
            "{} {}, id {}",
            query.sort.field.column(),
            query.sort.direction.keyword(),
            query.sort.direction.keyword()
        );

        if let Some(keyword) = query.keyword.as_deref() {
            let pattern = format!("%{keyword}%");
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE title LIKE ? OR description LIKE ?",
            )
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

            let sql = format!(
                "SELECT {PRODUCT_COLUMNS} FROM products \
                 WHERE title LIKE ? OR description LIKE ? \
                 ORDER BY {order} LIMIT ? OFFSET ?"
            );
            let products = sqlx::query_as::<_, Product>(&sql)
                .bind(&pattern)
                .bind(&pattern)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await?;

            Ok((products, total as u64))
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
                .fetch_one(&self.pool)
                .await?;

            let sql =
                format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY {order} LIMIT ? OFFSET ?");
            let products = sqlx::query_as::<_, Product>(&sql)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await?;

            Ok((products, total as u64))
        }
    }
}
