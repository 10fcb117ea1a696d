//! gRPC surface: wire messages and the authenticated dispatcher
pub mod proto;
pub mod server;

pub use server::{methods, StorefrontGrpc};
