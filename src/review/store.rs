//! In-process store of live review sessions
//!
//! One locked map keyed by session id, owned by whoever hosts the engine
//! and passed around by reference; tests instantiate their own isolated
//! stores. Expiry is advisory and only enforced when a caller invokes
//! [`SessionStore::cleanup_expired_sessions`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use tracing::debug;

use crate::diff::engine::Hunk;
use crate::document::Document;
use crate::review::session::{HunkCounts, HunkState, HunkStatus, ReviewSession};
use crate::utils::{truncate, DEFAULT_SESSION_MAX_AGE_SECS, LOG_PREVIEW_LEN};

/// Stateful shell holding every live review session for this process
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ReviewSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisory session TTL used by hosts that have no opinion of their own
    pub fn default_max_age() -> Duration {
        Duration::seconds(DEFAULT_SESSION_MAX_AGE_SECS)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ReviewSession>> {
        // Sessions stay usable even if a holder panicked mid-operation
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create and register a session for a proposed edit
    ///
    /// `hunks` is the annotated diff of `document.content` against
    /// `proposed_content`. Unchanged hunks are seeded `Accepted`,
    /// everything else `Pending`.
    pub fn create_session(
        &self,
        document: &Document,
        proposed_content: &str,
        hunks: Vec<Hunk>,
        summary: Option<String>,
        user_id: Option<String>,
    ) -> ReviewSession {
        let session = ReviewSession::new(document, proposed_content, hunks, summary, user_id);

        debug!(
            session_id = %session.id,
            document_id = %session.document_id,
            base_version = session.base_version,
            hunks = session.hunks.len(),
            summary = %truncate(session.summary.as_deref().unwrap_or(""), LOG_PREVIEW_LEN),
            "created review session"
        );

        self.lock().insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a session by id
    pub fn get_session(&self, id: &str) -> Option<ReviewSession> {
        self.lock().get(id).cloned()
    }

    /// Remove a session, returning its final state if it existed
    pub fn discard_session(&self, id: &str) -> Option<ReviewSession> {
        let removed = self.lock().remove(id);
        if let Some(session) = &removed {
            debug!(session_id = %session.id, "discarded review session");
        }
        removed
    }

    /// Apply a decision to one hunk of one session
    ///
    /// An unknown session id yields `None`; an unknown hunk id within a
    /// known session is a tolerant no-op returning the session unchanged,
    /// so stale client state never raises. The returned session reflects
    /// the freshly recomputed `current_content`.
    pub fn set_hunk_status(
        &self,
        session_id: &str,
        hunk_id: &str,
        status: HunkStatus,
    ) -> Option<ReviewSession> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(session_id)?;

        if session.set_hunk_status(hunk_id, status) {
            debug!(
                session_id = %session.id,
                hunk_id = %hunk_id,
                resolved = session.is_fully_resolved(),
                "updated hunk status"
            );
        }

        Some(session.clone())
    }

    /// Changed hunks still awaiting a decision; empty for unknown sessions
    pub fn get_pending_hunks(&self, session_id: &str) -> Vec<HunkState> {
        self.lock()
            .get(session_id)
            .map(|s| s.pending_hunks().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Decision tally over changed hunks; all zero for unknown sessions
    pub fn get_hunk_counts(&self, session_id: &str) -> HunkCounts {
        self.lock()
            .get(session_id)
            .map(|s| s.hunk_counts())
            .unwrap_or_default()
    }

    /// Drop every session older than `max_age`, returning how many went
    pub fn cleanup_expired_sessions(&self, max_age: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.age(now) <= max_age);
        let removed = before - sessions.len();

        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "expired review sessions");
        }
        removed
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.lock().len()
    }
}
