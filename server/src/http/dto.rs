use serde::{Deserialize, Serialize};
use shared_types::{Collection, Snapshot};

/// Request body for overwriting a collection
#[derive(Debug, Serialize, Deserialize)]
pub struct PutContentRequest {
    /// The whole document (JSON object or array); the store does not
    /// validate its shape
    pub content: serde_json::Value,

    /// Optional commit message for backends that version their writes.
    /// Defaults to "Update <collection> (via Admin CMS)".
    pub message: Option<String>,
}

/// Response for a successful content read
#[derive(Debug, Serialize, Deserialize)]
pub struct GetContentResponse {
    pub collection: String,
    pub content: serde_json::Value,
    /// Revision token of the bytes this content was read from; `null` on
    /// the local backend
    pub revision: Option<String>,
}

/// Response for successful writes
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

impl GetContentResponse {
    pub fn from_snapshot(collection: &Collection, snapshot: Snapshot) -> Self {
        Self {
            collection: collection.to_string(),
            content: snapshot.content,
            revision: snapshot.revision,
        }
    }
}
