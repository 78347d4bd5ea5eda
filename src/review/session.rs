use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::diff::engine::{Hunk, HunkKind};
use crate::document::Document;
use crate::review::reconstruct::apply_decisions;
use crate::utils::{hex, line_count, CONTENT_HASH_BYTES, UNTITLED_FALLBACK};

/// A point-in-time snapshot of document content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    /// Full text at this point
    pub content: String,
    /// Truncated SHA-256 of content for quick staleness checks
    pub content_hash: String,
    /// Line count at this snapshot
    pub line_count: usize,
}

impl ContentSnapshot {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            content_hash: compute_hash(content),
            line_count: line_count(content),
        }
    }
}

fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..CONTENT_HASH_BYTES])
}

/// Review decision state of a single hunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "text", rename_all = "lowercase")]
pub enum HunkStatus {
    /// Awaiting a decision
    Pending,
    /// Take the proposed text
    Accepted,
    /// Keep the original text
    Rejected,
    /// Take reviewer-supplied replacement text instead of either side
    Revised(String),
}

impl HunkStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, HunkStatus::Pending)
    }
}

/// A hunk plus its decision state within a review session
///
/// Unchanged hunks are seeded `Accepted` and never transition; everything
/// else starts `Pending` and may be re-decided freely until the session
/// ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkState {
    #[serde(flatten)]
    pub hunk: Hunk,
    pub status: HunkStatus,
}

impl HunkState {
    pub fn new(hunk: Hunk) -> Self {
        let status = if hunk.kind == HunkKind::Unchanged {
            HunkStatus::Accepted
        } else {
            HunkStatus::Pending
        };
        Self { hunk, status }
    }

    /// Whether this hunk needs a reviewer decision at all
    pub fn needs_decision(&self) -> bool {
        self.hunk.kind != HunkKind::Unchanged
    }
}

/// Per-status tally of the hunks that need decisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub revised: usize,
}

/// Mutable, time-bounded state for one proposed edit under review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    /// Process-unique session identifier (UUID)
    pub id: String,
    /// Backend id of the document under review
    pub document_id: String,
    /// Document version captured at creation, for the caller's
    /// optimistic-concurrency check before committing
    pub base_version: u64,
    /// Document title, or the untitled fallback
    pub title: String,
    /// Document content before the proposed edit
    pub original: ContentSnapshot,
    /// Full proposed replacement content
    pub proposed: ContentSnapshot,
    /// Agent-supplied summary of the proposed edit
    pub summary: Option<String>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Opaque id of the user reviewing, if known
    pub created_by: Option<String>,
    /// Annotated hunks with live decision state, in diff order
    pub hunks: Vec<HunkState>,
    /// Reconstructed text, present only while every changed hunk is
    /// resolved
    pub current_content: Option<String>,
}

impl ReviewSession {
    /// Build a session from a document, the proposed text, and the
    /// pre-annotated hunks of their diff
    pub fn new(
        document: &Document,
        proposed_content: &str,
        hunks: Vec<Hunk>,
        summary: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        let trimmed = document.title.trim();
        let title = if trimmed.is_empty() {
            UNTITLED_FALLBACK.to_string()
        } else {
            trimmed.to_string()
        };

        let mut session = Self {
            id: Uuid::new_v4().to_string(),
            document_id: document.id.clone(),
            base_version: document.version,
            title,
            original: ContentSnapshot::new(&document.content),
            proposed: ContentSnapshot::new(proposed_content),
            summary,
            created_at: Utc::now(),
            created_by: user_id,
            hunks: hunks.into_iter().map(HunkState::new).collect(),
            current_content: None,
        };
        session.refresh_current_content();
        session
    }

    /// Content before the proposed edit
    pub fn original_content(&self) -> &str {
        &self.original.content
    }

    /// Full proposed replacement content
    pub fn proposed_content(&self) -> &str {
        &self.proposed.content
    }

    /// Changed hunks still awaiting a decision, in diff order
    pub fn pending_hunks(&self) -> Vec<&HunkState> {
        self.hunks
            .iter()
            .filter(|h| h.needs_decision() && h.status == HunkStatus::Pending)
            .collect()
    }

    /// Tally decision states over the hunks that need decisions
    pub fn hunk_counts(&self) -> HunkCounts {
        let mut counts = HunkCounts::default();
        for hunk in self.hunks.iter().filter(|h| h.needs_decision()) {
            match hunk.status {
                HunkStatus::Pending => counts.pending += 1,
                HunkStatus::Accepted => counts.accepted += 1,
                HunkStatus::Rejected => counts.rejected += 1,
                HunkStatus::Revised(_) => counts.revised += 1,
            }
        }
        counts
    }

    /// Whether every changed hunk has a resolved status
    pub fn is_fully_resolved(&self) -> bool {
        self.hunks
            .iter()
            .filter(|h| h.needs_decision())
            .all(|h| h.status.is_resolved())
    }

    /// Apply a decision to one hunk by id
    ///
    /// Tolerant by design: an unknown id or an Unchanged hunk leaves the
    /// session untouched, so stale client state never raises. Returns
    /// whether anything changed.
    pub fn set_hunk_status(&mut self, hunk_id: &str, status: HunkStatus) -> bool {
        let target = self
            .hunks
            .iter_mut()
            .find(|h| h.hunk.id.as_deref() == Some(hunk_id));

        match target {
            Some(state) if state.needs_decision() => {
                state.status = status;
                self.refresh_current_content();
                true
            }
            _ => false,
        }
    }

    /// Recompute `current_content` from the live decision state
    ///
    /// Present exactly while every changed hunk is resolved; clears again
    /// if a hunk goes back to Pending.
    pub fn refresh_current_content(&mut self) {
        if self.is_fully_resolved() {
            match apply_decisions(&self.hunks) {
                Ok(content) => self.current_content = Some(content),
                Err(e) => {
                    // Unreachable once fully resolved, but never panic over it
                    tracing::warn!(session_id = %self.id, error = %e, "reconstruction failed");
                    self.current_content = None;
                }
            }
        } else {
            self.current_content = None;
        }
    }

    /// Age of this session relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}
