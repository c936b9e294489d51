//! GolfPlex API server binary.
//!
//! Serves the content-generation work queue and typeahead search over
//! HTTP. Configuration comes from the environment (a `.env` file is
//! honoured in development):
//!
//! | Env Var        | Default               |
//! |----------------|-----------------------|
//! | `DATABASE_URL` | `sqlite://golfplex.db` |
//! | `RUST_LOG`     | `info`                |
//!
//! plus the server settings documented on [`ServerConfig::from_env`].

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use golfplex_api::config::ServerConfig;
use golfplex_api::router::build_app_router;
use golfplex_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://golfplex.db".into());
    let pool = golfplex_db::create_pool(&database_url)
        .await
        .with_context(|| format!("Failed to open database at {database_url}"))?;
    golfplex_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    golfplex_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "GolfPlex API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
