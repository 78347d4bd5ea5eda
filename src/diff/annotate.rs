//! Hunk annotation: stable identifiers and 1-indexed line spans
//!
//! Runs once on the diff engine's output before the hunks enter a review
//! session, so every later decision can address a hunk by id.

use crate::diff::engine::{Hunk, LineSpan};
use crate::utils::line_count;

/// Assign sequential ids ("h1", "h2", ...) and line spans to a hunk list
///
/// Two 1-indexed counters walk the original and proposed documents in
/// parallel; each hunk receives a span on every side its kind occupies
/// and advances that side's counter past itself. A contributing side
/// that holds zero lines (empty text) keeps an absent span and leaves
/// its counter untouched.
pub fn annotate(mut hunks: Vec<Hunk>) -> Vec<Hunk> {
    let mut orig_line: u32 = 1;
    let mut new_line: u32 = 1;

    for (idx, hunk) in hunks.iter_mut().enumerate() {
        hunk.id = Some(format!("h{}", idx + 1));

        if hunk.kind.in_original() {
            let count = line_count(&hunk.original) as u32;
            if count > 0 {
                hunk.original_span = Some(LineSpan::new(orig_line, orig_line + count - 1));
                orig_line += count;
            }
        }

        if hunk.kind.in_new() {
            let count = line_count(&hunk.proposed) as u32;
            if count > 0 {
                hunk.new_span = Some(LineSpan::new(new_line, new_line + count - 1));
                new_line += count;
            }
        }
    }

    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::{compute_line_diff, HunkKind};

    #[test]
    fn test_sequential_ids() {
        let hunks = annotate(compute_line_diff("a\nb\nc", "a\nB\nc"));
        let ids: Vec<_> = hunks.iter().map(|h| h.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn test_spans_for_modification() {
        let hunks = annotate(compute_line_diff(
            "line 1\nline 2\nline 3",
            "line 1\nmodified line 2\nline 3",
        ));

        assert_eq!(hunks.len(), 3);
        assert_eq!(hunks[1].kind, HunkKind::Modified);
        assert_eq!(hunks[1].original_span, Some(LineSpan::new(2, 2)));
        assert_eq!(hunks[1].new_span, Some(LineSpan::new(2, 2)));
        assert_eq!(hunks[2].original_span, Some(LineSpan::new(3, 3)));
        assert_eq!(hunks[2].new_span, Some(LineSpan::new(3, 3)));
    }

    #[test]
    fn test_added_has_no_original_span() {
        let hunks = annotate(compute_line_diff("a\nc", "a\nb\nc"));
        let added = hunks.iter().find(|h| h.kind == HunkKind::Added).unwrap();
        assert!(added.original_span.is_none());
        assert_eq!(added.new_span, Some(LineSpan::new(2, 2)));
    }

    #[test]
    fn test_removed_has_no_new_span() {
        let hunks = annotate(compute_line_diff("a\nb\nc", "a\nc"));
        let removed = hunks.iter().find(|h| h.kind == HunkKind::Removed).unwrap();
        assert!(removed.new_span.is_none());
        assert_eq!(removed.original_span, Some(LineSpan::new(2, 2)));
    }

    #[test]
    fn test_removed_counter_skips_new_side() {
        let hunks = annotate(compute_line_diff("a\nb\nc\nd", "a\nd"));
        // Trailing unchanged hunk sits at line 4 of the original but
        // line 2 of the proposed document
        let last = hunks.last().unwrap();
        assert_eq!(last.kind, HunkKind::Unchanged);
        assert_eq!(last.original_span, Some(LineSpan::new(4, 4)));
        assert_eq!(last.new_span, Some(LineSpan::new(2, 2)));
    }

    #[test]
    fn test_zero_line_side_keeps_absent_span() {
        // A wholly-removed document yields a Removed hunk whose proposed
        // side is empty; the original side still spans the whole text
        let hunks = annotate(compute_line_diff("a\nb", ""));
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].original_span, Some(LineSpan::new(1, 2)));
        assert!(hunks[0].new_span.is_none());
    }
}
