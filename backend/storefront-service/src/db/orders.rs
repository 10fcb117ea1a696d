/// Order queries; an order and its items are always written together
use crate::db::OrderRepository;
use crate::error::{Result, StorefrontError};
use crate::models::{Order, OrderItem, OrderStatus, Page, Pagination};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    number: String,
    user_id: Uuid,
    status: String,
    total: f64,
    full_name: String,
    address: String,
    phone_number: String,
    notes: String,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    product_price: f64,
    quantity: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| StorefrontError::Internal(format!("orders.status: {e}")))?;

        Ok(Order {
            id: self.id,
            number: self.number,
            user_id: self.user_id,
            status,
            total: self.total,
            full_name: self.full_name,
            address: self.address,
            phone_number: self.phone_number,
            notes: self.notes,
            items,
            created_at: self.created_at,
            created_by: self.created_by,
            updated_at: self.updated_at,
            updated_by: self.updated_by,
        })
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            product_id: row.product_id,
            product_name: row.product_name,
            product_price: row.product_price,
            quantity: row.quantity,
        }
    }
}

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach items to a batch of order rows with a single query
    async fn hydrate(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_id, product_id, product_name, product_price, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    async fn page(&self, user_id: Option<Uuid>, pagination: Pagination) -> Result<Page<Order>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE ($1::uuid IS NULL OR user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT * FROM orders
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items: self.hydrate(rows).await?,
            total_items: total.max(0) as u64,
        })
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, number, user_id, status, total, full_name, address,
                phone_number, notes, created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.id)
        .bind(&order.number)
        .bind(order.user_id)
        .bind(order.status.as_str())
        .bind(order.total)
        .bind(&order.full_name)
        .bind(&order.address)
        .bind(&order.phone_number)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(&order.created_by)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, position, product_id, product_name, product_price, quantity
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(position as i32)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.product_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid, pagination: Pagination) -> Result<Page<Order>> {
        self.page(Some(user_id), pagination).await
    }

    async fn list_all(&self, pagination: Pagination) -> Result<Page<Order>> {
        self.page(None, pagination).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
        updated_by: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3, updated_by = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(updated_at)
        .bind(updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
