use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Both the primary and backup copies exist in some form but neither
    /// could be parsed. Distinct from "never written", which reads report
    /// as `Ok(None)`.
    #[error("collection {0} is corrupted beyond recovery")]
    Corrupted(String),

    /// The remote rejected a write because the revision token was stale:
    /// another writer updated the file after the token was read.
    #[error("revision conflict on {0}: the file changed since it was last read")]
    RevisionConflict(String),

    /// Non-success response from the remote contents API.
    #[error("remote contents API returned {status} for {path}: {message}")]
    Remote {
        path: String,
        status: u16,
        message: String,
    },
}
