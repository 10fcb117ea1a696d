use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Audit stamp for anonymous subscriptions
pub const PUBLIC_ACTOR: &str = "Public";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Newsletter {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}
