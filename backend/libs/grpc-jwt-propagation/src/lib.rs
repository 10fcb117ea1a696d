//! Bearer-token authentication for Storefront gRPC services
//!
//! ## Core Components
//!
//! - **CallIdentity**: caller identity decoded from a validated token
//! - **AuthInterceptor**: route-aware gate that validates tokens and attaches identities
//! - **PublicRoutes**: methods reachable without a token
//! - **RevocationCache**: in-process blacklist backing logout
//! - **BearerInterceptor**: injects a token into outgoing calls
//! - **IdentityExt**: request extension trait for reading the attached identity
//!
//! ## Server Side
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crypto_core::TokenCodec;
//! use grpc_jwt_propagation::{AuthInterceptor, PublicRoutes, RevocationCache};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = Arc::new(TokenCodec::new(b"a-secret-of-at-least-thirty-two-bytes!!")?);
//! let revocations = RevocationCache::new();
//! let interceptor = AuthInterceptor::new(
//!     codec,
//!     revocations,
//!     PublicRoutes::new(["/auth.AuthService/Login"]),
//! );
//! # let _ = interceptor;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Surface
//!
//! - Missing, malformed, revoked or foreign-signed token: `Unauthenticated` / "Unauthenticated"
//! - Expired token: `Unauthenticated` / "token expired"

mod claims;
mod client;
mod extensions;
mod revocation;
mod server;

pub use claims::CallIdentity;
pub use client::BearerInterceptor;
pub use extensions::{
    attach_identity, extract_bearer_token, unauthenticated, IdentityExt,
    AUTHORIZATION_METADATA_KEY, BEARER_SCHEME, TOKEN_EXPIRED_MESSAGE, UNAUTHENTICATED_MESSAGE,
};
pub use revocation::{RevocationCache, TtlMap};
pub use server::{AuthInterceptor, PublicRoutes};

// Re-export tonic Status for convenience
pub use tonic::Status;
