//! Deterministic reconstruction of final text from reviewed hunks

use thiserror::Error;

use crate::diff::engine::HunkKind;
use crate::review::session::{HunkState, HunkStatus};

/// Errors raised by the review engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Reconstruction was attempted while decisions were still open
    #[error("cannot finalize: {count} change(s) still pending review")]
    PendingHunks { count: usize },
}

/// Build the final document text from a fully-decided hunk list
///
/// Hunks are walked in diff order and each contributes the text its
/// decision selects: `Accepted` takes the proposed side, `Rejected` the
/// original side, `Revised` the reviewer's replacement, and `Unchanged`
/// always its original text. A hunk whose selected side exists for its
/// kind contributes even when empty (that preserves deliberate blank
/// lines); a side the kind never had — the proposed side of a `Removed`
/// hunk, the original side of an `Added` one — contributes nothing, which
/// is what makes removals and dropped additions take effect. Pieces are
/// joined with `\n`.
///
/// Fails if any changed hunk is still `Pending`.
pub fn apply_decisions(hunks: &[HunkState]) -> Result<String, ReviewError> {
    let mut pieces: Vec<&str> = Vec::with_capacity(hunks.len());
    let mut pending = 0usize;

    for state in hunks {
        // Unchanged hunks are taken verbatim whatever their status says
        if state.hunk.kind == HunkKind::Unchanged {
            pieces.push(&state.hunk.original);
            continue;
        }

        match &state.status {
            HunkStatus::Pending => pending += 1,
            HunkStatus::Accepted => {
                if state.hunk.kind.in_new() {
                    pieces.push(&state.hunk.proposed);
                }
            }
            HunkStatus::Rejected => {
                if state.hunk.kind.in_original() {
                    pieces.push(&state.hunk.original);
                }
            }
            HunkStatus::Revised(text) => pieces.push(text),
        }
    }

    if pending > 0 {
        return Err(ReviewError::PendingHunks { count: pending });
    }

    Ok(pieces.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::annotate::annotate;
    use crate::diff::engine::compute_line_diff;

    fn states(original: &str, proposed: &str) -> Vec<HunkState> {
        annotate(compute_line_diff(original, proposed))
            .into_iter()
            .map(HunkState::new)
            .collect()
    }

    fn decide_all(states: &mut [HunkState], status: HunkStatus) {
        for state in states.iter_mut().filter(|s| s.needs_decision()) {
            state.status = status.clone();
        }
    }

    #[test]
    fn test_pending_hunk_fails() {
        let hunks = states("a\nb", "a\nB");
        let err = apply_decisions(&hunks).unwrap_err();
        assert_eq!(err, ReviewError::PendingHunks { count: 1 });
        assert!(err.to_string().contains("pending"));
    }

    #[test]
    fn test_accept_all_yields_proposed() {
        let original = "line 1\nline 2\nline 3";
        let proposed = "line 1\nmodified\nline 3\nline 4";
        let mut hunks = states(original, proposed);
        decide_all(&mut hunks, HunkStatus::Accepted);

        assert_eq!(apply_decisions(&hunks).unwrap(), proposed);
    }

    #[test]
    fn test_reject_all_yields_original() {
        let original = "line 1\nline 2\nline 3";
        let proposed = "line 1\nmodified\nline 4";
        let mut hunks = states(original, proposed);
        decide_all(&mut hunks, HunkStatus::Rejected);

        assert_eq!(apply_decisions(&hunks).unwrap(), original);
    }

    #[test]
    fn test_accepted_removal_drops_lines() {
        let mut hunks = states("a\nb\nc", "a\nc");
        decide_all(&mut hunks, HunkStatus::Accepted);
        assert_eq!(apply_decisions(&hunks).unwrap(), "a\nc");
    }

    #[test]
    fn test_rejected_addition_drops_lines() {
        let mut hunks = states("a\nc", "a\nb\nc");
        decide_all(&mut hunks, HunkStatus::Rejected);
        assert_eq!(apply_decisions(&hunks).unwrap(), "a\nc");
    }

    #[test]
    fn test_mixed_decisions() {
        // original -> proposed changes line 2 and appends line 4
        let mut hunks = states("a\nb\nc", "a\nB\nc\nd");

        for state in hunks.iter_mut().filter(|s| s.needs_decision()) {
            state.status = match state.hunk.kind {
                HunkKind::Modified => HunkStatus::Accepted,
                _ => HunkStatus::Rejected,
            };
        }

        assert_eq!(apply_decisions(&hunks).unwrap(), "a\nB\nc");
    }

    #[test]
    fn test_revised_text_wins() {
        let mut hunks = states("a\nb\nc", "a\nB\nc");
        decide_all(&mut hunks, HunkStatus::Revised("edited by hand".to_string()));
        assert_eq!(apply_decisions(&hunks).unwrap(), "a\nedited by hand\nc");
    }

    #[test]
    fn test_blank_line_modification_survives() {
        // Replacing a line with a blank one must keep the blank on accept
        let mut hunks = states("a\nx\nb", "a\n\nb");
        decide_all(&mut hunks, HunkStatus::Accepted);
        assert_eq!(apply_decisions(&hunks).unwrap(), "a\n\nb");
    }

    #[test]
    fn test_whole_document_roundtrips() {
        let original = "";
        let proposed = "brand new\ncontent";
        let mut hunks = states(original, proposed);

        decide_all(&mut hunks, HunkStatus::Accepted);
        assert_eq!(apply_decisions(&hunks).unwrap(), proposed);

        decide_all(&mut hunks, HunkStatus::Rejected);
        assert_eq!(apply_decisions(&hunks).unwrap(), original);
    }
}
