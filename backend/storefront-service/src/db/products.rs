/// Product catalog queries
use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::{Page, Pagination, Product};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, image_file_name,
                created_at, created_by, is_deleted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_file_name)
        .bind(product.created_at)
        .bind(&product.created_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, image_file_name = $5,
                updated_at = $6, updated_by = $7
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_file_name)
        .bind(product.updated_at)
        .bind(&product.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, deleted_at: DateTime<Utc>, deleted_by: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET is_deleted = TRUE, deleted_at = $2, deleted_by = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(deleted_at)
        .bind(deleted_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Product>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_deleted = FALSE")
                .fetch_one(&self.pool)
                .await?;

        let items = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE is_deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items,
            total_items: total.max(0) as u64,
        })
    }

    async fn list_latest(&self, limit: u32) -> Result<Vec<Product>> {
        let items = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE is_deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
