//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth crate through `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthService, JwtTokenIssuer, PgCredentialStore, auth_router};
use axum::Router;
use axum::http::StatusCode;
use platform::password::Argon2Hasher;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppEnv, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("failed to load configuration")?;

    init_tracing(config.env);

    tracing::info!(
        env = ?config.env,
        addr = %config.http_addr,
        token_ttl_secs = config.token_ttl.as_secs(),
        "Starting auth server"
    );

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    if config.run_migrations {
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;

        tracing::info!("Migrations completed");
    }

    let hasher = Argon2Hasher::new(config.hash_cost).context("invalid password hash cost")?;

    let service = AuthService::new(
        Arc::new(PgCredentialStore::new(pool)),
        Arc::new(hasher),
        Arc::new(JwtTokenIssuer::new()),
        config.auth_config(),
    );

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(service))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;

    tracing::info!("Listening on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Pretty output locally, JSON elsewhere; `RUST_LOG` overrides the level
fn init_tracing(env: AppEnv) {
    let default_filter = match env {
        AppEnv::Local | AppEnv::Dev => "api=debug,auth=debug,tower_http=debug",
        AppEnv::Prod => "api=info,auth=info,tower_http=info",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        AppEnv::Local => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        AppEnv::Dev | AppEnv::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Resolves on Ctrl+C or SIGTERM; in-flight requests are allowed to finish
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
