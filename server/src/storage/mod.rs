mod config;
mod error;
mod github;
mod local;
mod traits;


pub use config::{GitHubConfig, StorageConfig};
pub use error::StorageError;
pub use github::GitHubStore;
pub use local::LocalStore;
pub use traits::ContentStore;

use anyhow::Result;
use std::sync::Arc;

/// Build the process-wide content store from startup configuration.
///
/// The backend is selected exactly once here; nothing downstream consults
/// the environment per call.
pub fn from_config(config: StorageConfig) -> Result<Arc<dyn ContentStore>> {
    let store: Arc<dyn ContentStore> = match config {
        StorageConfig::Local { data_dir } => Arc::new(LocalStore::new(data_dir)?),
        StorageConfig::GitHub(github) => Arc::new(GitHubStore::new(github)?),
    };
    Ok(store)
}
