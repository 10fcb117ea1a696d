use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Order lifecycle
///
/// ```text
/// unpaid -> paid -> shipped -> done
///    \
///     -> canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Unpaid,
    Paid,
    Shipped,
    Done,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "unpaid",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Done => "done",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Moves an administrator may make
    pub fn admin_can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Unpaid, OrderStatus::Paid)
                | (OrderStatus::Paid, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Done)
                | (OrderStatus::Unpaid, OrderStatus::Canceled)
        )
    }

    /// Moves the customer who placed the order may make
    pub fn owner_can_transition_to(self, next: OrderStatus) -> bool {
        self == OrderStatus::Unpaid && next == OrderStatus::Canceled
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(OrderStatus::Unpaid),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "done" => Ok(OrderStatus::Done),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// Product line captured at order time; later catalog edits do not touch it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.product_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub number: String,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total: f64,
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
    pub notes: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Order {
    /// Invoice number: creation instant plus the head of the order id, so
    /// orders placed in the same millisecond stay distinct
    pub fn number_for(created_at: DateTime<Utc>, id: Uuid) -> String {
        let suffix = id.simple().to_string();
        format!(
            "INV-{}-{}",
            created_at.timestamp_millis(),
            suffix[..8].to_uppercase()
        )
    }
}
