/// Storefront Service Main Entry Point
///
/// Starts gRPC server with:
/// - PostgreSQL connection pool (or in-memory repositories without `DATABASE_URL`)
/// - HS256 token codec
/// - Token revocation cache and its sweeper (background task)
use anyhow::{Context, Result};
use crypto_core::TokenCodec;
use grpc_jwt_propagation::{AuthInterceptor, RevocationCache};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use storefront_service::{
    config::Settings,
    db::Repositories,
    grpc::{methods, StorefrontGrpc},
    Services,
};
use tokio::signal;
use tonic::transport::Server;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "storefront_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Storefront Service");

    // Load configuration
    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let codec = Arc::new(
        TokenCodec::new(settings.jwt.secret.as_bytes()).context("Failed to initialize JWT codec")?,
    );
    info!("JWT codec initialized");

    let revocations = RevocationCache::new();
    let _sweeper = revocations.spawn_sweeper(Duration::from_secs(
        settings.security.revocation_sweep_interval_secs,
    ));

    let repositories = match &settings.database {
        Some(database) => {
            let db_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(&database.url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            info!(
                "Database pool initialized with {} max connections",
                database.max_connections
            );

            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Database migrations completed");

            Repositories::postgres(db_pool)
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory repositories, data is lost on restart");
            Repositories::in_memory()
        }
    };

    let services = Arc::new(Services::new(
        repositories,
        codec.clone(),
        revocations.clone(),
        &settings.security,
        &settings.storage,
    ));
    let interceptor = AuthInterceptor::new(codec, revocations, methods::public_routes());

    let addr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("Starting gRPC server on {}", addr);

    StorefrontGrpc::new(services, interceptor)
        .into_router(&mut Server::builder())
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Storefront service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
