//! Integration Tests for bearer propagation
//!
//! These tests verify the complete flow:
//! Client -> bearer injection -> AuthInterceptor -> revocation -> handler access

use crypto_core::jwt::{Claims, Role, TokenCodec};
use grpc_jwt_propagation::{
    AuthInterceptor, BearerInterceptor, IdentityExt, PublicRoutes, RevocationCache,
    TOKEN_EXPIRED_MESSAGE, UNAUTHENTICATED_MESSAGE,
};
use std::sync::Arc;
use std::time::Duration;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use uuid::Uuid;

const TEST_SECRET: &[u8] = b"storefront-integration-secret-0123456789";
const PROTECTED: &str = "/order.OrderService/ListOrder";
const PUBLIC: &str = "/product.ProductService/ListProduct";

struct Harness {
    codec: Arc<TokenCodec>,
    revocations: RevocationCache,
    interceptor: AuthInterceptor,
}

fn harness() -> Harness {
    let codec = Arc::new(TokenCodec::new(TEST_SECRET).expect("valid secret"));
    let revocations = RevocationCache::new();
    let interceptor = AuthInterceptor::new(
        codec.clone(),
        revocations.clone(),
        PublicRoutes::new([PUBLIC]),
    );
    Harness {
        codec,
        revocations,
        interceptor,
    }
}

/// Simulate a call flowing through the client and server interceptors
async fn simulate_grpc_flow(
    harness: &Harness,
    method: &str,
    token: &str,
) -> Result<Option<Uuid>, Status> {
    let mut client = BearerInterceptor::new(token)?;
    let request = client.call(Request::new(()))?;

    harness
        .interceptor
        .intercept(method, request, |request| async move {
            Ok(request.identity().ok().map(|identity| identity.user_id))
        })
        .await
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let harness = harness();
    let user_id = Uuid::new_v4();
    let claims = Claims::new(user_id, "ana@example.com", "Ana", Role::Customer);
    let token = harness.codec.issue(&claims).unwrap();

    let seen = simulate_grpc_flow(&harness, PROTECTED, &token)
        .await
        .expect("Flow should succeed");

    assert_eq!(seen, Some(user_id));
}

#[tokio::test]
async fn test_end_to_end_invalid_token() {
    let harness = harness();

    let status = simulate_grpc_flow(&harness, PROTECTED, "invalid.jwt.token")
        .await
        .unwrap_err();

    assert_eq!(status.code(), tonic::Code::Unauthenticated);
    assert_eq!(status.message(), UNAUTHENTICATED_MESSAGE);
}

#[tokio::test]
async fn test_end_to_end_expired_token() {
    let harness = harness();
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        iat: now - 90_000,
        exp: now - 3_600,
        ..Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", Role::Customer)
    };
    let token = harness.codec.issue(&claims).unwrap();

    let status = simulate_grpc_flow(&harness, PROTECTED, &token)
        .await
        .unwrap_err();

    assert_eq!(status.message(), TOKEN_EXPIRED_MESSAGE);
}

#[tokio::test]
async fn test_logout_revocation_blocks_next_call() {
    let harness = harness();
    let claims = Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", Role::Customer);
    let token = harness.codec.issue(&claims).unwrap();

    assert!(simulate_grpc_flow(&harness, PROTECTED, &token).await.is_ok());

    harness
        .revocations
        .revoke(&token, Duration::from_secs(claims.remaining_secs()));

    let status = simulate_grpc_flow(&harness, PROTECTED, &token)
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unauthenticated);

    // A fresh login is unaffected
    let fresh = Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", Role::Customer);
    let fresh_token = harness.codec.issue(&fresh).unwrap();
    assert!(simulate_grpc_flow(&harness, PROTECTED, &fresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_public_route_without_identity() {
    let harness = harness();

    let seen = simulate_grpc_flow(&harness, PUBLIC, "whatever").await.unwrap();

    assert_eq!(seen, None);
}

#[tokio::test]
async fn test_tokens_interoperate_across_interceptors() {
    // Two servers sharing a secret accept each other's tokens but not each other's revocations
    let first = harness();
    let second = harness();
    let claims = Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", Role::Admin);
    let token = first.codec.issue(&claims).unwrap();

    first.revocations.revoke(&token, Duration::from_secs(60));

    assert!(simulate_grpc_flow(&first, PROTECTED, &token).await.is_err());
    assert!(simulate_grpc_flow(&second, PROTECTED, &token).await.is_ok());
}
