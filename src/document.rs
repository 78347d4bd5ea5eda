//! The document abstraction consumed at session creation
//!
//! Retrieval and persistence of documents live in the host; this crate
//! only needs the snapshot handed to `SessionStore::create_session`.

use serde::{Deserialize, Serialize};

/// A document as seen by the review engine at session creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Backend identifier for the document
    pub id: String,
    /// Monotonic version, captured as `base_version` for the caller's
    /// optimistic-concurrency check at commit time
    pub version: u64,
    /// Document title (may be blank)
    pub title: String,
    /// Full document text
    pub content: String,
}

impl Document {
    pub fn new(id: &str, version: u64, title: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            version,
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}
