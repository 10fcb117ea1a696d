/// End-to-end authentication tests over a real gRPC channel
mod common;

use common::{TestServer, PASSWORD};
use crypto_core::jwt::{Claims, Role, TokenCodec};
use storefront_service::config::SecuritySettings;
use storefront_service::grpc::methods;
use storefront_service::grpc::proto::auth::{
    ChangePasswordRequest, ChangePasswordResponse, GetProfileRequest, GetProfileResponse,
    LogoutRequest, LogoutResponse, RegisterRequest, RegisterResponse,
};
use tonic::Code;
use uuid::Uuid;

async fn profile(server: &TestServer, token: Option<&str>) -> Result<GetProfileResponse, tonic::Status> {
    server
        .call(methods::GET_PROFILE, token, GetProfileRequest {})
        .await
}

#[tokio::test]
async fn test_login_profile_logout_then_reuse_rejected() {
    let server = TestServer::start().await;
    let token = server.customer("ana@example.com").await;

    let me = profile(&server, Some(&token)).await.expect("profile");
    assert_eq!(me.email, "ana@example.com");
    assert_eq!(me.role_code, "customer");

    let logout: LogoutResponse = server
        .call(methods::LOGOUT, Some(&token), LogoutRequest {})
        .await
        .expect("logout");
    assert_eq!(logout.base.unwrap().message, "Logout Success");
    assert!(server.revocations.is_revoked(&token));

    let status = profile(&server, Some(&token)).await.unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), "Unauthenticated");
}

#[tokio::test]
async fn test_login_outcomes() {
    let server = TestServer::start().await;
    server.register("ana@example.com", "Ana").await;

    let wrong = server.login("ana@example.com", "not-the-password").await.unwrap_err();
    assert_eq!(wrong.code(), Code::Unauthenticated);

    let unknown = server.login("nobody@example.com", PASSWORD).await.expect("envelope");
    let base = unknown.base.unwrap();
    assert!(base.is_error);
    assert_eq!(base.status_code, 404);

    let ok = server.login("ana@example.com", PASSWORD).await.expect("login");
    let claims = server.codec.decode(&ok.access_token).expect("decode");
    assert_eq!(claims.role, Role::Customer);
    assert_eq!(claims.full_name, "Ana");
}

#[tokio::test]
async fn test_register_envelopes() {
    let server = TestServer::start().await;
    server.register("ana@example.com", "Ana").await;

    let duplicate = server.register("ana@example.com", "Ana again").await;
    assert_eq!(duplicate.base.unwrap().status_code, 409);

    let mismatch: RegisterResponse = server
        .call(
            methods::REGISTER,
            None,
            RegisterRequest {
                email: "bob@example.com".into(),
                password: PASSWORD.into(),
                password_confirmation: "something-else".into(),
                full_name: "Bob".into(),
            },
        )
        .await
        .expect("register");
    let base = mismatch.base.unwrap();
    assert!(base.is_error);
    assert_eq!(base.validation_errors[0].field, "password_confirmation");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let server = TestServer::start().await;

    let status = profile(&server, None).await.unwrap_err();

    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), "Unauthenticated");
}

#[tokio::test]
async fn test_expired_token_reports_expiry() {
    let server = TestServer::start().await;
    let token = server.expired_token();

    let status = profile(&server, Some(&token)).await.unwrap_err();

    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), "token expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let server = TestServer::start().await;
    let foreign = TokenCodec::new(b"some-other-deployment-secret-0123456789").unwrap();
    let token = foreign
        .issue(&Claims::new(Uuid::new_v4(), "x@example.com", "X", Role::Admin))
        .unwrap();

    let status = profile(&server, Some(&token)).await.unwrap_err();

    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_public_route_ignores_garbage_credentials() {
    let server = TestServer::start().await;
    server.register("ana@example.com", "Ana").await;

    let response = server
        .call::<_, storefront_service::grpc::proto::auth::LoginResponse>(
            methods::LOGIN,
            Some("not.a.jwt"),
            storefront_service::grpc::proto::auth::LoginRequest {
                email: "ana@example.com".into(),
                password: PASSWORD.into(),
            },
        )
        .await
        .expect("public route should not authenticate");

    assert!(!response.access_token.is_empty());
}

#[tokio::test]
async fn test_password_change_keeps_token_by_default() {
    let server = TestServer::start().await;
    let token = server.customer("ana@example.com").await;

    let changed: ChangePasswordResponse = server
        .call(
            methods::CHANGE_PASSWORD,
            Some(&token),
            ChangePasswordRequest {
                old_password: PASSWORD.into(),
                new_password: "a-brand-new-password".into(),
                new_password_confirmation: "a-brand-new-password".into(),
            },
        )
        .await
        .expect("change password");
    assert!(!changed.base.unwrap().is_error);

    assert!(profile(&server, Some(&token)).await.is_ok());
    assert!(server.login("ana@example.com", "a-brand-new-password").await.is_ok());
    assert_eq!(
        server.login("ana@example.com", PASSWORD).await.unwrap_err().code(),
        Code::Unauthenticated
    );
}

#[tokio::test]
async fn test_password_change_revokes_when_configured() {
    let server = TestServer::start_with(SecuritySettings {
        revoke_tokens_on_password_change: true,
        ..SecuritySettings::default()
    })
    .await;
    let token = server.customer("ana@example.com").await;

    let _: ChangePasswordResponse = server
        .call(
            methods::CHANGE_PASSWORD,
            Some(&token),
            ChangePasswordRequest {
                old_password: PASSWORD.into(),
                new_password: "a-brand-new-password".into(),
                new_password_confirmation: "a-brand-new-password".into(),
            },
        )
        .await
        .expect("change password");

    let status = profile(&server, Some(&token)).await.unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_unknown_method_is_unimplemented() {
    let server = TestServer::start().await;

    let status = server
        .call::<_, LogoutResponse>("/auth.AuthService/Teleport", None, LogoutRequest {})
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Unimplemented);
}
