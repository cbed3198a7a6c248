use anyhow::Result;
use server::{http, storage};
use std::net::SocketAddr;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    info!("Starting portfolio content server");

    // Backend is chosen once at startup and injected into the store
    let config = storage::StorageConfig::from_env()?;
    match &config {
        storage::StorageConfig::Local { data_dir } => {
            info!("Using local backend at {}", data_dir.display());
        }
        storage::StorageConfig::GitHub(github) => {
            info!(
                "Using GitHub backend: {}/{} @ {}",
                github.owner, github.repo, github.branch
            );
        }
    }
    let store = storage::from_config(config)?;

    // Bind to address
    let addr = std::env::var("BIND_ADDRESS")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse::<SocketAddr>()?;

    // Start the HTTP server
    http::start_server(store, addr).await?;

    Ok(())
}
