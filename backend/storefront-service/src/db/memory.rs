//! In-memory repositories
//!
//! Each adapter mirrors the postgres one closely enough for the services not
//! to notice: soft-deleted products are hidden, emails are unique, an order is
//! stored together with its items and listings come back newest first.

use crate::db::{
    CartRepository, NewsletterRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::error::{Result, StorefrontError};
use crate::models::{CartItem, Newsletter, Order, OrderStatus, Page, Pagination, Product, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Sort newest first and cut out the requested page
fn paginate<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>, pagination: Pagination) -> Page<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    let total_items = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();

    Page { items, total_items }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<Uuid, User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, user: &User) -> Result<()> {
        if self.get_by_email(&user.email).await?.is_some() {
            return Err(StorefrontError::Database(format!(
                "duplicate key: users.email {}",
                user.email
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str, updated_by: &str) -> Result<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
            user.updated_at = Some(Utc::now());
            user.updated_by = Some(updated_by.to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: DashMap<Uuid, Product>,
}

impl InMemoryProductRepository {
    fn live(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|entry| !entry.is_deleted)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self
            .products
            .get(&id)
            .filter(|entry| !entry.is_deleted)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        self.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        if let Some(mut stored) = self.products.get_mut(&product.id) {
            if !stored.is_deleted {
                stored.name = product.name.clone();
                stored.description = product.description.clone();
                stored.price = product.price;
                stored.image_file_name = product.image_file_name.clone();
                stored.updated_at = product.updated_at;
                stored.updated_by = product.updated_by.clone();
            }
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, deleted_at: DateTime<Utc>, deleted_by: &str) -> Result<()> {
        if let Some(mut stored) = self.products.get_mut(&id) {
            stored.is_deleted = true;
            stored.deleted_at = Some(deleted_at);
            stored.deleted_by = Some(deleted_by.to_string());
        }
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Product>> {
        Ok(paginate(self.live(), |p| p.created_at, pagination))
    }

    async fn list_latest(&self, limit: u32) -> Result<Vec<Product>> {
        let page = paginate(self.live(), |p| p.created_at, Pagination::new(1, i64::from(limit)));
        Ok(page.items)
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    items: DashMap<Uuid, CartItem>,
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<CartItem>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_by_product_and_user(&self, product_id: Uuid, user_id: Uuid) -> Result<Option<CartItem>> {
        Ok(self
            .items
            .iter()
            .find(|entry| entry.product_id == product_id && entry.user_id == user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
        let mut items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }

    async fn insert(&self, item: &CartItem) -> Result<()> {
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &CartItem) -> Result<()> {
        if let Some(mut stored) = self.items.get_mut(&item.id) {
            stored.quantity = item.quantity;
            stored.updated_at = item.updated_at;
            stored.updated_by = item.updated_by.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.items.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<Uuid, Order>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<()> {
        if self.orders.iter().any(|entry| entry.number == order.number) {
            return Err(StorefrontError::Database(format!(
                "duplicate key: orders.number {}",
                order.number
            )));
        }
        self.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.orders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_user(&self, user_id: Uuid, pagination: Pagination) -> Result<Page<Order>> {
        let orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(paginate(orders, |o| o.created_at, pagination))
    }

    async fn list_all(&self, pagination: Pagination) -> Result<Page<Order>> {
        let orders: Vec<Order> = self.orders.iter().map(|entry| entry.value().clone()).collect();
        Ok(paginate(orders, |o| o.created_at, pagination))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
        updated_by: &str,
    ) -> Result<()> {
        if let Some(mut order) = self.orders.get_mut(&id) {
            order.status = status;
            order.updated_at = Some(updated_at);
            order.updated_by = Some(updated_by.to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryNewsletterRepository {
    subscriptions: DashMap<String, Newsletter>,
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<Newsletter>> {
        Ok(self.subscriptions.get(email).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, newsletter: &Newsletter) -> Result<()> {
        self.subscriptions
            .entry(newsletter.email.clone())
            .or_insert_with(|| newsletter.clone());
        Ok(())
    }
}
