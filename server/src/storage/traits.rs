use anyhow::Result;
use async_trait::async_trait;
use shared_types::{Collection, Snapshot};

/// Whole-document JSON storage behind the HTTP surface.
///
/// Reads return `Ok(None)` when a collection has never been written.
/// Recoverable local corruption is handled inside the backend (backup
/// fallback); everything else surfaces as a typed [`StorageError`] wrapped
/// in `anyhow::Error`.
///
/// [`StorageError`]: super::StorageError
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read a collection, served from a short-lived cache where the backend
    /// keeps one.
    async fn read(&self, collection: &Collection) -> Result<Option<Snapshot>>;

    /// Read a collection bypassing any cache.
    ///
    /// Write paths use this internally to obtain a fresh revision token and
    /// minimise the window for update conflicts.
    async fn read_fresh(&self, collection: &Collection) -> Result<Option<Snapshot>>;

    /// Overwrite a collection with `content`.
    ///
    /// `message` becomes the commit message on backends that version their
    /// writes; the local backend ignores it. The store never retries on a
    /// revision conflict -- callers decide whether to re-read and resubmit.
    async fn write(
        &self,
        collection: &Collection,
        content: &serde_json::Value,
        message: &str,
    ) -> Result<()>;
}
