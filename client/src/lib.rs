use anyhow::Result;
use reqwest::{Client as ReqwestClient, StatusCode};
use shared_types::{Collection, Snapshot};
use std::time::Duration;
use thiserror::Error;

/// Another writer updated the collection between the admin's read and this
/// write. Callers may re-read and resubmit.
#[derive(Error, Debug)]
#[error("revision conflict on {0}: the collection changed since it was last read")]
pub struct RevisionConflict(pub String);

/// Client for the portfolio content service
pub struct ContentClient {
    client: ReqwestClient,
    base_url: String,
}

impl ContentClient {
    /// Create a new client instance
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Read the current document of a collection
    pub async fn get_content(&self, collection: &Collection) -> Result<Snapshot> {
        let url = format!("{}/content/{}", self.base_url, collection);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            anyhow::bail!("Collection not found: {}", collection);
        }

        response.error_for_status_ref()?;

        let data: serde_json::Value = response.json().await?;

        Ok(Snapshot {
            content: data["content"].clone(),
            revision: data["revision"].as_str().map(ToString::to_string),
        })
    }

    /// Overwrite the whole document of a collection
    pub async fn put_content(
        &self,
        collection: &Collection,
        content: serde_json::Value,
        message: Option<String>,
    ) -> Result<()> {
        let url = format!("{}/content/{}", self.base_url, collection);

        let body = serde_json::json!({
            "content": content,
            "message": message,
        });

        let response = self.client.put(&url).json(&body).send().await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(RevisionConflict(collection.to_string()).into());
        }

        response.error_for_status()?;

        Ok(())
    }

    /// Check if the service is healthy
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        Ok(response.status() == StatusCode::OK)
    }
}
