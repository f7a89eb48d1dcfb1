pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{ClinicError, ClinicResult, ValidationError};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Connect the configured store, bootstrap it and serve until shutdown
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    if config.database.in_memory {
        log::warn!("Using the in-memory store, records are lost on shutdown");
        return serve_with_store(Arc::new(MemoryStore::new()), &config).await;
    }

    log::info!("Connecting to PostgreSQL...");
    let postgres_store =
        PostgresStore::new(&config.database_url(), config.database.max_connections).await?;

    log::info!("Running database migrations...");
    postgres_store.migrate().await?;

    serve_with_store(Arc::new(postgres_store), &config).await
}

pub async fn serve_with_store<S: Store + 'static>(
    store: Arc<S>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if config.seed.enabled {
        seed::seed_if_empty(&*store, chrono::Utc::now()).await?;
    }

    let app = routes::build_app(store, &config.cors);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("PetClinic API running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
