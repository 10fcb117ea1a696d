/// Cart line queries
use crate::db::CartRepository;
use crate::error::Result;
use crate::models::CartItem;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn get_by_product_and_user(&self, product_id: Uuid, user_id: Uuid) -> Result<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE product_id = $1 AND user_id = $2",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn insert(&self, item: &CartItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity, created_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(&item.created_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, item: &CartItem) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE cart_items
            SET quantity = $2, updated_at = $3, updated_by = $4
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(item.quantity)
        .bind(item.updated_at)
        .bind(&item.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
