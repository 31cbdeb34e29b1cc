//! # zgs-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the 0G Storage download gateway.
//! Binds to configurable port (default 3000). Exits before listening when
//! `PRIVATE_KEY` is absent.

use std::net::SocketAddr;
use std::sync::Arc;

use zgs_api::AppConfig;
use zgs_indexer_client::IndexerClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;

    let indexer = IndexerClient::new(config.indexer.clone()).map_err(|e| {
        tracing::error!("Failed to create indexer client: {e}");
        e
    })?;
    tracing::info!(indexer = %indexer.base_url(), "Indexer client configured");

    let port = config.port;
    let state = zgs_api::AppState::new(config, Arc::new(indexer));
    let app = zgs_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on port {port}");
    tracing::info!("Swagger UI: http://localhost:{port}/api-docs");
    #[cfg(feature = "swagger")]
    tracing::info!("Bundled Swagger UI: http://localhost:{port}/swagger-ui/");

    axum::serve(listener, app).await?;

    Ok(())
}
