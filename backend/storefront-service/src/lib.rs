/// Storefront Service Library
///
/// Authenticated gRPC storefront: accounts, catalogue, cart, orders and
/// newsletter subscriptions behind a bearer-token gate.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: Repository traits with PostgreSQL and in-memory adapters
/// - `error`: Error types
/// - `grpc`: Wire messages and the route-aware dispatcher
/// - `models`: Data models
/// - `security`: Password hashing
/// - `services`: Business logic per gRPC service
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;
pub mod security;
pub mod services;

// Re-export commonly used types
pub use error::{Result, StorefrontError};
pub use grpc::StorefrontGrpc;
pub use services::Services;
