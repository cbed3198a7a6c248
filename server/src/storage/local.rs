use anyhow::Result;
use async_trait::async_trait;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use shared_types::{Collection, Snapshot};
use std::path::Path as FsPath;
use std::sync::Arc;
use tracing::warn;

use super::error::StorageError;
use super::traits::ContentStore;

/// Development backend: one pretty-printed JSON file per collection on a
/// writable disk, with a sibling `.backup.json` copy refreshed before every
/// overwrite.
///
/// There is no revision token and no protection against concurrent writers;
/// the intended deployment is single-writer development use.
pub struct LocalStore {
    store: Arc<dyn ObjectStore>,
}

/// Result of reading one physical file, kept separate from the public
/// read outcome so "missing" and "present but unparsable" stay
/// distinguishable when combining primary and backup.
enum Load {
    Loaded(serde_json::Value),
    Missing,
    Unreadable,
}

impl LocalStore {
    pub fn new(data_dir: impl AsRef<FsPath>) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        let store = LocalFileSystem::new_with_prefix(data_dir)?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    async fn load(&self, location: &Path) -> Load {
        let bytes = match self.store.get(location).await {
            Ok(result) => match result.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("failed to read {location}: {e}");
                    return Load::Unreadable;
                }
            },
            Err(object_store::Error::NotFound { .. }) => return Load::Missing,
            Err(e) => {
                warn!("failed to read {location}: {e}");
                return Load::Unreadable;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Load::Loaded(value),
            Err(e) => {
                warn!("failed to parse {location}: {e}");
                Load::Unreadable
            }
        }
    }
}

#[async_trait]
impl ContentStore for LocalStore {
    async fn read(&self, collection: &Collection) -> Result<Option<Snapshot>> {
        let primary = Path::from(collection.file_name());

        let primary_outcome = self.load(&primary).await;
        if let Load::Loaded(value) = primary_outcome {
            return Ok(Some(Snapshot::new(value, None)));
        }

        let backup = Path::from(collection.backup_file_name());
        match (primary_outcome, self.load(&backup).await) {
            (_, Load::Loaded(value)) => {
                warn!("serving backup copy of {collection}");
                Ok(Some(Snapshot::new(value, None)))
            }
            // Neither copy has ever been written
            (Load::Missing, Load::Missing) => Ok(None),
            _ => Err(StorageError::Corrupted(collection.to_string()).into()),
        }
    }

    async fn read_fresh(&self, collection: &Collection) -> Result<Option<Snapshot>> {
        // No cache on the local backend
        self.read(collection).await
    }

    async fn write(
        &self,
        collection: &Collection,
        content: &serde_json::Value,
        _message: &str,
    ) -> Result<()> {
        let primary = Path::from(collection.file_name());
        let backup = Path::from(collection.backup_file_name());

        // Snapshot the pre-write state first. A failed backup never blocks
        // the write; a missing primary just means this is the first write.
        match self.store.copy(&primary, &backup).await {
            Ok(()) => {}
            Err(object_store::Error::NotFound { .. }) => {}
            Err(e) => warn!("backup of {collection} failed: {e}"),
        }

        let json = serde_json::to_vec_pretty(content)?;
        self.store.put(&primary, PutPayload::from(json)).await?;
        Ok(())
    }
}
