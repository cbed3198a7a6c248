use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use shared_types::{Collection, Snapshot};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::config::GitHubConfig;
use super::error::StorageError;
use super::traits::ContentStore;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("portfolio-content-store/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Revalidation window for cached reads. Fresh reads bypass it entirely.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Production backend: one JSON file per collection inside a GitHub
/// repository, read and written through the contents API.
///
/// Every write is a commit. The blob SHA returned by reads doubles as an
/// optimistic-concurrency token: a PUT carrying a stale SHA is rejected by
/// GitHub with 409, which surfaces here as
/// [`StorageError::RevisionConflict`]. The store never retries a conflict.
pub struct GitHubStore {
    client: Client,
    config: GitHubConfig,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    snapshot: Snapshot,
    fetched_at: Instant,
}

/// Read payload of the contents API.
#[derive(Deserialize)]
struct FileResponse {
    content: String,
    sha: String,
}

/// Write payload of the contents API; only the new blob SHA matters here.
#[derive(Deserialize)]
struct WriteResponse {
    content: Option<BlobRef>,
}

#[derive(Deserialize)]
struct BlobRef {
    sha: String,
}

impl GitHubStore {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    fn contents_url(&self, collection: &Collection) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}/{}",
            self.config.api_base,
            self.config.owner,
            self.config.repo,
            self.config.content_dir,
            collection.file_name()
        )
    }

    /// Uncached GET against the contents API. `Ok(None)` means the file
    /// does not exist on the branch.
    async fn fetch(&self, collection: &Collection) -> Result<Option<Snapshot>> {
        let url = self.contents_url(collection);
        debug!("fetching {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Remote {
                path: collection.to_string(),
                status,
                message,
            }
            .into());
        }

        let file: FileResponse = response
            .json()
            .await
            .with_context(|| format!("malformed contents payload for {collection}"))?;

        // GitHub wraps base64 payloads at 60 columns
        let encoded: String = file
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = BASE64
            .decode(encoded)
            .with_context(|| format!("invalid base64 content for {collection}"))?;
        let content: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("invalid JSON content for {collection}"))?;

        Ok(Some(Snapshot::new(content, Some(file.sha))))
    }

    async fn cache_insert(&self, collection: &Collection, snapshot: Snapshot) {
        let mut cache = self.cache.write().await;
        cache.insert(
            collection.to_string(),
            CacheEntry {
                snapshot,
                fetched_at: Instant::now(),
            },
        );
    }
}

#[async_trait]
impl ContentStore for GitHubStore {
    async fn read(&self, collection: &Collection) -> Result<Option<Snapshot>> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(collection.as_str()) {
                if entry.fetched_at.elapsed() < CACHE_TTL {
                    return Ok(Some(entry.snapshot.clone()));
                }
            }
        }

        self.read_fresh(collection).await
    }

    async fn read_fresh(&self, collection: &Collection) -> Result<Option<Snapshot>> {
        match self.fetch(collection).await? {
            Some(snapshot) => {
                self.cache_insert(collection, snapshot.clone()).await;
                Ok(Some(snapshot))
            }
            None => {
                self.cache.write().await.remove(collection.as_str());
                Ok(None)
            }
        }
    }

    async fn write(
        &self,
        collection: &Collection,
        content: &serde_json::Value,
        message: &str,
    ) -> Result<()> {
        // A fresh token keeps the staleness window as small as the two
        // sequential calls allow. No token means the file does not exist
        // yet and this write creates it.
        let revision = self
            .read_fresh(collection)
            .await?
            .and_then(|snapshot| snapshot.revision);

        let json = serde_json::to_string_pretty(content)?;
        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(json.as_bytes()),
            "branch": self.config.branch,
        });
        if let Some(sha) = &revision {
            body["sha"] = serde_json::Value::String(sha.clone());
        }

        let url = self.contents_url(collection);
        info!("committing {collection} ({})", message);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("PUT {url} failed"))?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StorageError::RevisionConflict(collection.to_string()).into());
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Remote {
                path: collection.to_string(),
                status,
                message,
            }
            .into());
        }

        // Keep the cache coherent with what was just committed
        let committed: WriteResponse = response.json().await.unwrap_or(WriteResponse {
            content: None,
        });
        match committed.content {
            Some(blob) => {
                self.cache_insert(collection, Snapshot::new(content.clone(), Some(blob.sha)))
                    .await;
            }
            None => {
                self.cache.write().await.remove(collection.as_str());
            }
        }

        Ok(())
    }
}
