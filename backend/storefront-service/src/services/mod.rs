//! Business logic behind each gRPC service
//!
//! Every method receives the caller's identity explicitly, as attached by the
//! interceptor, and returns the wire response. Role checks happen before any
//! repository write.

pub mod auth;
pub mod cart;
pub mod newsletter;
pub mod order;
pub mod product;
pub mod response;

pub use auth::AuthService;
pub use cart::CartService;
pub use newsletter::NewsletterService;
pub use order::OrderService;
pub use product::ProductService;

use crate::config::{SecuritySettings, StorageSettings};
use crate::db::Repositories;
use crate::error::{Result, StorefrontError};
use crypto_core::jwt::{Role, TokenCodec};
use grpc_jwt_propagation::{CallIdentity, RevocationCache};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// All services sharing one set of repositories
pub struct Services {
    pub auth: AuthService,
    pub products: ProductService,
    pub carts: CartService,
    pub orders: OrderService,
    pub newsletters: NewsletterService,
}

impl Services {
    pub fn new(
        repositories: Repositories,
        codec: Arc<TokenCodec>,
        revocations: RevocationCache,
        security: &SecuritySettings,
        storage: &StorageSettings,
    ) -> Self {
        Self {
            auth: AuthService::new(
                repositories.users.clone(),
                codec,
                revocations,
                security.revoke_tokens_on_password_change,
            ),
            products: ProductService::new(repositories.products.clone(), &storage.service_url),
            carts: CartService::new(
                repositories.carts.clone(),
                repositories.products.clone(),
                &storage.service_url,
            ),
            orders: OrderService::new(repositories.orders.clone(), repositories.products.clone()),
            newsletters: NewsletterService::new(repositories.newsletters),
        }
    }
}

/// The authenticated caller; absent identity means the interceptor was bypassed
pub(crate) fn caller(identity: Option<&CallIdentity>) -> Result<&CallIdentity> {
    identity.ok_or_else(|| {
        warn!("Protected operation reached without an identity");
        StorefrontError::Unauthenticated
    })
}

/// The authenticated caller, provided it holds `role`
pub(crate) fn require_role(identity: Option<&CallIdentity>, role: Role) -> Result<&CallIdentity> {
    let identity = caller(identity)?;

    if !identity.has_role(role) {
        warn!(
            user_id = %identity.user_id,
            role = %identity.role,
            required = %role,
            "Role check failed"
        );
        return Err(StorefrontError::Unauthenticated);
    }

    Ok(identity)
}

/// Ids arrive as strings; anything that is not a UUID cannot match a record
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Public URL of a stored product image
pub(crate) fn image_url(storage_url: &str, file_name: &str) -> String {
    format!("{}/product/{}", storage_url.trim_end_matches('/'), file_name)
}
