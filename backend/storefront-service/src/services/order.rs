//! Checkout and order lifecycle
//!
//! Prices are copied from the catalogue at checkout so later edits to a
//! product never change an existing order. Status moves follow
//! [`OrderStatus::admin_can_transition_to`] for admins and
//! [`OrderStatus::owner_can_transition_to`] for the customer who placed it.

use crate::db::{OrderRepository, ProductRepository};
use crate::error::{Result, StorefrontError};
use crate::grpc::proto::common::PaginationRequest;
use crate::grpc::proto::order::*;
use crate::models::{Order, OrderItem, OrderStatus, Page, Pagination};
use crate::services::{caller, parse_id, require_role, response};
use chrono::Utc;
use crypto_core::jwt::Role;
use grpc_jwt_propagation::CallIdentity;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
}

fn pagination_of(request: Option<PaginationRequest>) -> Pagination {
    request
        .map(|p| Pagination::new(p.current_page, p.item_per_page))
        .unwrap_or_default()
}

fn order_products(items: &[OrderItem]) -> Vec<OrderProduct> {
    items
        .iter()
        .map(|item| OrderProduct {
            id: item.product_id.to_string(),
            name: item.product_name.clone(),
            price: item.product_price,
            quantity: item.quantity,
        })
        .collect()
}

fn list_response(pagination: Pagination, page: Page<Order>) -> ListOrderResponse {
    ListOrderResponse {
        base: response::success("Get list order success"),
        pagination: response::pagination(pagination, page.total_items),
        items: page
            .items
            .into_iter()
            .map(|order| OrderSummary {
                id: order.id.to_string(),
                number: order.number,
                customer_name: order.full_name,
                status_code: order.status.to_string(),
                total: order.total,
                created_at: response::timestamp(order.created_at),
                products: order_products(&order.items),
            })
            .collect(),
    }
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { orders, products }
    }

    /// Order visible to the caller: their own, or any order for an admin
    async fn visible_order(&self, identity: &CallIdentity, raw_id: &str) -> Result<Option<Order>> {
        let Some(id) = parse_id(raw_id) else {
            return Ok(None);
        };
        let Some(order) = self.orders.get_by_id(id).await? else {
            return Ok(None);
        };

        if !identity.is_admin() && !identity.is_owner(&order.user_id) {
            warn!(
                user_id = %identity.user_id,
                order_id = %order.id,
                "Order belongs to another user"
            );
            return Err(StorefrontError::Unauthenticated);
        }

        Ok(Some(order))
    }

    pub async fn create(
        &self,
        identity: Option<&CallIdentity>,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse> {
        let identity = caller(identity)?;

        if request.products.is_empty() {
            return Ok(CreateOrderResponse {
                base: response::bad_request("Order must contain at least one product"),
                id: String::new(),
            });
        }

        let mut items = Vec::with_capacity(request.products.len());
        for line in &request.products {
            if line.quantity <= 0 {
                return Ok(CreateOrderResponse {
                    base: response::validation_error("quantity", "Quantity must be positive"),
                    id: String::new(),
                });
            }

            let product = match parse_id(&line.id) {
                Some(id) => self.products.get_by_id(id).await?,
                None => None,
            };
            let Some(product) = product else {
                return Ok(CreateOrderResponse {
                    base: response::not_found(format!("Product {} not found", line.id)),
                    id: String::new(),
                });
            };

            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name,
                product_price: product.price,
                quantity: line.quantity,
            });
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let order = Order {
            id,
            number: Order::number_for(now, id),
            user_id: identity.user_id,
            status: OrderStatus::Unpaid,
            total: items.iter().map(OrderItem::subtotal).sum(),
            full_name: request.full_name,
            address: request.address,
            phone_number: request.phone_number,
            notes: request.notes,
            items,
            created_at: now,
            created_by: identity.user_id.to_string(),
            updated_at: None,
            updated_by: None,
        };
        self.orders.insert(&order).await?;

        info!(
            order_id = %order.id,
            number = %order.number,
            user_id = %identity.user_id,
            total = order.total,
            "Order created"
        );

        Ok(CreateOrderResponse {
            base: response::success("Create order success"),
            id: order.id.to_string(),
        })
    }

    pub async fn list(
        &self,
        identity: Option<&CallIdentity>,
        request: ListOrderRequest,
    ) -> Result<ListOrderResponse> {
        let identity = caller(identity)?;
        let pagination = pagination_of(request.pagination);

        let page = self.orders.list_by_user(identity.user_id, pagination).await?;
        Ok(list_response(pagination, page))
    }

    pub async fn list_admin(
        &self,
        identity: Option<&CallIdentity>,
        request: ListOrderAdminRequest,
    ) -> Result<ListOrderResponse> {
        require_role(identity, Role::Admin)?;
        let pagination = pagination_of(request.pagination);

        let page = self.orders.list_all(pagination).await?;
        Ok(list_response(pagination, page))
    }

    pub async fn detail(
        &self,
        identity: Option<&CallIdentity>,
        request: DetailOrderRequest,
    ) -> Result<DetailOrderResponse> {
        let identity = caller(identity)?;

        let Some(order) = self.visible_order(identity, &request.id).await? else {
            return Ok(DetailOrderResponse {
                base: response::not_found("Order not found"),
                ..Default::default()
            });
        };

        Ok(DetailOrderResponse {
            base: response::success("Get detail order success"),
            id: order.id.to_string(),
            items: order_products(&order.items),
            number: order.number,
            user_full_name: order.full_name,
            address: order.address,
            phone_number: order.phone_number,
            notes: order.notes,
            order_status_code: order.status.to_string(),
            created_at: response::timestamp(order.created_at),
            total: order.total,
        })
    }

    pub async fn update_status(
        &self,
        identity: Option<&CallIdentity>,
        request: UpdateOrderStatusRequest,
    ) -> Result<UpdateOrderStatusResponse> {
        let identity = caller(identity)?;

        let Some(order) = self.visible_order(identity, &request.order_id).await? else {
            return Ok(UpdateOrderStatusResponse {
                base: response::not_found("Order not found"),
            });
        };

        let Ok(next) = request.new_status_code.parse::<OrderStatus>() else {
            return Ok(UpdateOrderStatusResponse {
                base: response::validation_error("new_status_code", "Unknown order status"),
            });
        };

        let allowed = (identity.is_admin() && order.status.admin_can_transition_to(next))
            || (identity.is_owner(&order.user_id) && order.status.owner_can_transition_to(next));
        if !allowed {
            return Ok(UpdateOrderStatusResponse {
                base: response::bad_request("Invalid status transition"),
            });
        }

        self.orders
            .update_status(order.id, next, Utc::now(), &identity.user_id.to_string())
            .await?;

        info!(
            order_id = %order.id,
            from = %order.status,
            to = %next,
            user_id = %identity.user_id,
            "Order status updated"
        );

        Ok(UpdateOrderStatusResponse {
            base: response::success("Update order status success"),
        })
    }
}
