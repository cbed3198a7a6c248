use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Logical name of a content collection (e.g. `projects`, `about`,
/// `running-text`). Names are validated so they can be embedded directly
/// into filesystem and repository paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Collection(String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid collection name: {0:?}")]
pub struct InvalidCollection(pub String);

impl Collection {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: impl Into<String>) -> Result<Self, InvalidCollection> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidCollection(name))
        }
    }

    /// Lowercase alphanumeric plus `-` and `_`, 1..=64 chars. Anything else
    /// (dots, slashes, uppercase) is rejected before it can reach a backend
    /// path.
    fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= Self::MAX_LEN
            && name
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this collection's primary copy.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// File name of this collection's backup copy (local backend only).
    pub fn backup_file_name(&self) -> String {
        format!("{}.backup.json", self.0)
    }
}

impl FromStr for Collection {
    type Err = InvalidCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Collection {
    type Error = InvalidCollection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Collection> for String {
    fn from(value: Collection) -> Self {
        value.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A whole document as read from a backend: the JSON content plus the
/// revision token identifying the exact bytes it was read from.
///
/// `revision` is the GitHub blob SHA for the remote backend and `None` for
/// the local backend, which has no revision concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub content: serde_json::Value,
    pub revision: Option<String>,
}

impl Snapshot {
    pub fn new(content: serde_json::Value, revision: Option<String>) -> Self {
        Self { content, revision }
    }
}
