//! In-process storefront server for integration tests
//!
//! Binds an ephemeral port, serves the full router over in-memory
//! repositories and talks to it through a real tonic channel.
#![allow(dead_code)]

use crypto_core::jwt::{Claims, Role, TokenCodec};
use grpc_jwt_propagation::{AuthInterceptor, BearerInterceptor, RevocationCache};
use std::net::SocketAddr;
use std::sync::Arc;
use storefront_service::config::{SecuritySettings, StorageSettings};
use storefront_service::db::{Repositories, UserRepository};
use storefront_service::grpc::methods;
use storefront_service::grpc::proto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use storefront_service::models::User;
use storefront_service::security::hash_password;
use storefront_service::{Services, StorefrontGrpc};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Server};
use tonic::{Request, Status};

pub const TEST_SECRET: &[u8] = b"storefront-integration-secret-0123456789";
pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestServer {
    pub addr: SocketAddr,
    pub codec: Arc<TokenCodec>,
    pub revocations: RevocationCache,
    pub repositories: Repositories,
    channel: Channel,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(SecuritySettings::default()).await
    }

    pub async fn start_with(security: SecuritySettings) -> Self {
        let codec = Arc::new(TokenCodec::new(TEST_SECRET).expect("codec"));
        let revocations = RevocationCache::new();
        let repositories = Repositories::in_memory();

        let services = Arc::new(Services::new(
            repositories.clone(),
            codec.clone(),
            revocations.clone(),
            &security,
            &StorageSettings::default(),
        ));
        let interceptor =
            AuthInterceptor::new(codec.clone(), revocations.clone(), methods::public_routes());
        let router = StorefrontGrpc::new(services, interceptor).into_router(&mut Server::builder());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind gRPC port");
        let addr = listener.local_addr().expect("local addr");
        let incoming = TcpListenerStream::new(listener);

        tokio::spawn(async move {
            router
                .serve_with_incoming(incoming)
                .await
                .expect("start storefront server");
        });

        let channel = Channel::from_shared(format!("http://{addr}"))
            .expect("endpoint")
            .connect()
            .await
            .expect("connect to storefront server");

        Self {
            addr,
            codec,
            revocations,
            repositories,
            channel,
        }
    }

    /// Unary call to `path`, optionally with a bearer token
    pub async fn call<Req, Resp>(
        &self,
        path: &'static str,
        token: Option<&str>,
        message: Req,
    ) -> Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut client = tonic::client::Grpc::new(self.channel.clone());
        client
            .ready()
            .await
            .map_err(|e| Status::unavailable(e.to_string()))?;

        let mut request = Request::new(message);
        if let Some(token) = token {
            request = BearerInterceptor::new(token)?.apply(request);
        }

        client
            .unary(
                request,
                PathAndQuery::from_static(path),
                ProstCodec::<Req, Resp>::default(),
            )
            .await
            .map(tonic::Response::into_inner)
    }

    pub async fn register(&self, email: &str, full_name: &str) -> RegisterResponse {
        self.call(
            methods::REGISTER,
            None,
            RegisterRequest {
                email: email.into(),
                password: PASSWORD.into(),
                password_confirmation: PASSWORD.into(),
                full_name: full_name.into(),
            },
        )
        .await
        .expect("register")
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Status> {
        self.call(
            methods::LOGIN,
            None,
            LoginRequest {
                email: email.into(),
                password: password.into(),
            },
        )
        .await
    }

    /// Register a customer and return their token
    pub async fn customer(&self, email: &str) -> String {
        self.register(email, "Customer").await;
        self.login(email, PASSWORD).await.expect("login").access_token
    }

    /// Seed an administrator directly and return their token
    pub async fn admin(&self) -> String {
        let user = User {
            role: Role::Admin,
            ..User::new_customer("Admin", "admin@storefront.dev", hash_password(PASSWORD).expect("hash"))
        };
        self.repositories.users.insert(&user).await.expect("seed admin");
        self.login("admin@storefront.dev", PASSWORD)
            .await
            .expect("admin login")
            .access_token
    }

    /// A correctly signed token whose `exp` is an hour in the past
    pub fn expired_token(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iat: now - 7200,
            exp: now - 3600,
            ..Claims::new(uuid::Uuid::new_v4(), "late@example.com", "Late", Role::Customer)
        };
        self.codec.issue(&claims).expect("issue expired token")
    }
}
