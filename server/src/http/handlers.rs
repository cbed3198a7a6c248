use axum::{
    extract::{Path, State},
    Json,
};
use shared_types::Collection;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    dto::{GetContentResponse, PutContentRequest, SuccessResponse},
    error::{ApiError, ApiResult},
    state::AppState,
};

fn parse_collection(name: &str) -> ApiResult<Collection> {
    Collection::new(name).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// GET /content/:collection
/// Read the current document of a collection
#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> ApiResult<Json<GetContentResponse>> {
    info!("Reading collection: {}", collection);

    let collection = parse_collection(&collection)?;

    match state.store.read(&collection).await? {
        Some(snapshot) => Ok(Json(GetContentResponse::from_snapshot(
            &collection,
            snapshot,
        ))),
        None => Err(ApiError::NotFound(format!(
            "Collection not found: {collection}"
        ))),
    }
}

/// PUT /content/:collection
/// Overwrite the whole document of a collection
#[instrument(skip(state, request))]
pub async fn put_content(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Json(request): Json<PutContentRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    info!("Writing collection: {}", collection);

    let collection = parse_collection(&collection)?;

    // Same commit message shape the admin CMS has always used
    let message = request
        .message
        .unwrap_or_else(|| format!("Update {collection} (via Admin CMS)"));

    state
        .store
        .write(&collection, &request.content, &message)
        .await?;

    Ok(Json(SuccessResponse {
        message: format!("Collection {collection} updated successfully"),
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "portfolio-content",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
