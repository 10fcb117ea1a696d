use chrono::{DateTime, Utc};
use crypto_core::jwt::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User model - registered customer or administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl User {
    /// New customer account, self-registered
    pub fn new_customer(full_name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Customer,
            created_at: Utc::now(),
            created_by: full_name.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }
}
