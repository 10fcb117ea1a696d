//! Repository traits and their adapters
//!
//! Services depend only on the traits below. `Repositories::postgres` wires the
//! sqlx adapters; `Repositories::in_memory` wires the DashMap-backed ones used
//! by tests and by deployments without `DATABASE_URL`.

pub mod carts;
pub mod memory;
pub mod newsletters;
pub mod orders;
pub mod products;
pub mod users;

use crate::error::Result;
use crate::models::{CartItem, Newsletter, Order, OrderStatus, Page, Pagination, Product, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn insert(&self, user: &User) -> Result<()>;

    async fn update_password(&self, id: Uuid, password_hash: &str, updated_by: &str) -> Result<()>;
}

/// Catalog storage; every read ignores soft-deleted rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    async fn insert(&self, product: &Product) -> Result<()>;

    /// Overwrite name, description, price, image and the update stamp
    async fn update(&self, product: &Product) -> Result<()>;

    async fn soft_delete(&self, id: Uuid, deleted_at: DateTime<Utc>, deleted_by: &str) -> Result<()>;

    async fn list(&self, pagination: Pagination) -> Result<Page<Product>>;

    /// Most recently created products first
    async fn list_latest(&self, limit: u32) -> Result<Vec<Product>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<CartItem>>;

    async fn get_by_product_and_user(&self, product_id: Uuid, user_id: Uuid) -> Result<Option<CartItem>>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>>;

    async fn insert(&self, item: &CartItem) -> Result<()>;

    /// Overwrite quantity and the update stamp
    async fn update(&self, item: &CartItem) -> Result<()>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store the order and all of its items atomically
    async fn insert(&self, order: &Order) -> Result<()>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>>;

    /// Newest first
    async fn list_by_user(&self, user_id: Uuid, pagination: Pagination) -> Result<Page<Order>>;

    /// Newest first
    async fn list_all(&self, pagination: Pagination) -> Result<Page<Order>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
        updated_by: &str,
    ) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<Newsletter>>;

    async fn insert(&self, newsletter: &Newsletter) -> Result<()>;
}

/// The full set of repositories a server needs
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub newsletters: Arc<dyn NewsletterRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(users::PgUserRepository::new(pool.clone())),
            products: Arc::new(products::PgProductRepository::new(pool.clone())),
            carts: Arc::new(carts::PgCartRepository::new(pool.clone())),
            orders: Arc::new(orders::PgOrderRepository::new(pool.clone())),
            newsletters: Arc::new(newsletters::PgNewsletterRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::InMemoryUserRepository::default()),
            products: Arc::new(memory::InMemoryProductRepository::default()),
            carts: Arc::new(memory::InMemoryCartRepository::default()),
            orders: Arc::new(memory::InMemoryOrderRepository::default()),
            newsletters: Arc::new(memory::InMemoryNewsletterRepository::default()),
        }
    }
}
