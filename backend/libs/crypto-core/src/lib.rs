//! Cryptographic primitives shared by Storefront services
//!
//! - `jwt`: HS256 token codec and identity claims
//! - `hash`: SHA-256 helpers

pub mod hash;
pub mod jwt;

pub use jwt::{Claims, Role, TokenCodec, TokenError};
