//! Contabi API Server
//!
//! Main entry point for the accountancy back-office service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contabi_api::{AppState, create_router};
use contabi_db::{
    AccountancyRepository, connect,
    migration::{Migrator, MigratorTrait},
};
use contabi_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contabi=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = Arc::new(connect(&config.database).await?);
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    if config.database.run_migrations {
        Migrator::up(db.as_ref(), None).await?;
        info!("Migrations applied");
    }

    // Create application state
    let state = AppState::new(AccountancyRepository::new(Arc::clone(&db)));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its repository are gone once `serve` returns.
    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await?,
        Err(_) => warn!("Connection pool still shared at shutdown; leaving it to drop"),
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
