//! Per-call identity derived from a validated token
//!
//! `CallIdentity` is what the interceptor attaches to a request once the
//! bearer token has passed revocation and signature checks. Handlers receive
//! it explicitly and never see the raw metadata.

use crypto_core::jwt::{Claims, Role, TokenError};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identity of the caller for the duration of a single RPC
///
/// ## Design Notes
///
/// - Fields are public
/// - Immutable once built; cloned by value into service logic
/// - Keeps the bearer token it was decoded from so logout can revoke it
#[derive(Clone, PartialEq, Eq)]
pub struct CallIdentity {
    /// User ID (UUID parsed from `sub` claim)
    pub user_id: Uuid,

    /// Email address
    pub email: String,

    /// Display name, stamped into audit fields
    pub full_name: String,

    /// Authorization role
    pub role: Role,

    /// Issued at timestamp (Unix timestamp)
    pub iat: i64,

    /// Expiration timestamp (Unix timestamp)
    pub exp: i64,

    token: String,
}

impl CallIdentity {
    /// Build an identity from claims that already passed validation
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::Malformed` if `sub` is not a valid UUID
    pub fn from_validated_claims(claims: Claims, token: &str) -> Result<Self, TokenError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| TokenError::Malformed(format!("invalid user ID in JWT: {e}")))?;

        Ok(Self {
            user_id,
            email: claims.email,
            full_name: claims.full_name,
            role: claims.role,
            iat: claims.iat,
            exp: claims.exp,
            token: token.to_string(),
        })
    }

    /// The bearer token this identity was decoded from
    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Check if the user ID matches a given UUID
    pub fn is_owner(&self, resource_owner_id: &Uuid) -> bool {
        &self.user_id == resource_owner_id
    }

    /// How long the token keeps passing validation, zero once past `exp`.
    ///
    /// Validation accepts a token while `now <= exp`, so the second named by
    /// `exp` is still live and counts toward the window.
    pub fn remaining_ttl(&self) -> Duration {
        self.remaining_ttl_at(chrono::Utc::now().timestamp())
    }

    pub(crate) fn remaining_ttl_at(&self, now: i64) -> Duration {
        if self.exp < now {
            return Duration::ZERO;
        }
        Duration::from_secs((self.exp - now + 1) as u64)
    }
}

impl fmt::Debug for CallIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallIdentity")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish_non_exhaustive()
    }
}
