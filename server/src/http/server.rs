use anyhow::Result;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::{handlers, state::AppState};
use crate::storage::ContentStore;

pub async fn start_server(store: Arc<dyn ContentStore>, bind_address: SocketAddr) -> Result<()> {
    let app_state = Arc::new(AppState { store });

    // Build the router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Whole-document content operations
        .route(
            "/content/:collection",
            get(handlers::get_content).put(handlers::put_content),
        )
        // Add state
        .with_state(app_state)
        // Add middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Server listening on {}", bind_address);

    // Run the server
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
