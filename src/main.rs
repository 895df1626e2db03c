//! Sales Explorer server binary

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sales_explorer::config::AppConfig;
use sales_explorer::server::{AppState, build_router, cors_layer};
use sales_explorer::storage::PostgresSalesService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to postgres")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("database connected");

    let state = AppState {
        sales: Arc::new(PostgresSalesService::new(pool)),
    };
    let app = build_router(state).layer(cors_layer(&config.frontend_url)?);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!("server running on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
