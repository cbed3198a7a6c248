#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use client::{ContentClient, RevisionConflict};
use shared_types::Collection;

#[tokio::test]
async fn test_get_content_parses_snapshot() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/content/projects")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "collection": "projects",
                "content": {"projects": [{"id": "p1"}]},
                "revision": "abc123",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ContentClient::new(server.url()).unwrap();
    let collection = Collection::new("projects").unwrap();

    let snapshot = client.get_content(&collection).await.unwrap();
    assert_eq!(snapshot.content, serde_json::json!({"projects": [{"id": "p1"}]}));
    assert_eq!(snapshot.revision.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_get_content_missing_is_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/content/settings")
        .with_status(404)
        .with_body(r#"{"error": "Not Found", "details": "Collection not found: settings"}"#)
        .create_async()
        .await;

    let client = ContentClient::new(server.url()).unwrap();
    let collection = Collection::new("settings").unwrap();

    let err = client.get_content(&collection).await.unwrap_err();
    assert!(err.to_string().contains("Collection not found"));
}

#[tokio::test]
async fn test_put_content_sends_document_and_message() {
    let mut server = mockito::Server::new_async().await;
    let put = server
        .mock("PUT", "/content/about")
        .match_body(mockito::Matcher::PartialJsonString(
            serde_json::json!({
                "content": {"bio": "hello"},
                "message": "Update about",
            })
            .to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"message": "Collection about updated successfully"}"#)
        .create_async()
        .await;

    let client = ContentClient::new(server.url()).unwrap();
    let collection = Collection::new("about").unwrap();

    client
        .put_content(
            &collection,
            serde_json::json!({"bio": "hello"}),
            Some("Update about".to_string()),
        )
        .await
        .unwrap();

    put.assert_async().await;
}

#[tokio::test]
async fn test_put_content_conflict_is_typed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", "/content/settings")
        .with_status(409)
        .with_body(r#"{"error": "Revision Conflict", "details": "stale token"}"#)
        .create_async()
        .await;

    let client = ContentClient::new(server.url()).unwrap();
    let collection = Collection::new("settings").unwrap();

    let err = client
        .put_content(&collection, serde_json::json!({"theme": "light"}), None)
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<RevisionConflict>().is_some());
}

#[tokio::test]
async fn test_health_check() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status": "healthy", "service": "portfolio-content"}"#)
        .create_async()
        .await;

    let client = ContentClient::new(server.url()).unwrap();
    assert!(client.health_check().await.unwrap());
}
