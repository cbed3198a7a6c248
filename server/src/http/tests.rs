#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::dto::*;
use super::handlers;
use super::state::AppState;
use crate::storage::LocalStore;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalStore::new(temp_dir.path()).unwrap();
    let state = Arc::new(AppState {
        store: Arc::new(store),
    });

    let app = Router::new()
        .route(
            "/content/:collection",
            get(handlers::get_content).put(handlers::put_content),
        )
        .route("/health", get(handlers::health_check))
        .with_state(state);

    (app, temp_dir)
}

fn put_request(collection: &str, body: &PutContentRequest) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/content/{collection}"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "portfolio-content");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_put_and_get_content() {
    let (app, _dir) = create_test_app();

    let document = serde_json::json!({"projects": [{"id": "p1", "title": "Folio"}]});
    let request = PutContentRequest {
        content: document.clone(),
        message: None,
    };

    let response = app
        .clone()
        .oneshot(put_request("projects", &request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/content/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let content: GetContentResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(content.collection, "projects");
    assert_eq!(content.content, document);
    assert_eq!(content.revision, None);
}

#[tokio::test]
async fn test_get_nonexistent_collection() {
    let (app, _dir) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/content/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_collection_name_is_bad_request() {
    let (app, _dir) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/content/Nope.Json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = PutContentRequest {
        content: serde_json::json!({}),
        message: None,
    };
    let response = app
        .oneshot(put_request("UPPER", &request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_overwrites_previous_document() {
    let (app, _dir) = create_test_app();

    let v1 = PutContentRequest {
        content: serde_json::json!({"items": ["a"]}),
        message: Some("Seed running text".to_string()),
    };
    let v2 = PutContentRequest {
        content: serde_json::json!({"items": ["a", "b"]}),
        message: None,
    };

    app.clone()
        .oneshot(put_request("running-text", &v1))
        .await
        .unwrap();
    app.clone()
        .oneshot(put_request("running-text", &v2))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/content/running-text")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let content: GetContentResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(content.content, v2.content);
}
