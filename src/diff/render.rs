//! Plain-text rendering helpers for hunk lists
//!
//! Display-only: collapsing long unchanged spans never changes what the
//! reconstructor emits, which always takes unchanged hunks verbatim.

use crate::diff::engine::{Hunk, HunkKind};
use crate::utils::{line_count, UNCHANGED_DISPLAY_THRESHOLD};

/// Collapse an unchanged span that exceeds `max_lines` into
/// first half + `(N lines unchanged)` marker + second half
///
/// Shows the first `ceil(max_lines / 2)` and last `floor(max_lines / 2)`
/// lines; `N` counts only the hidden middle. Text at or under the
/// threshold comes back verbatim.
pub fn collapse_unchanged(text: &str, max_lines: usize) -> String {
    let total = line_count(text);
    if total <= max_lines || max_lines == 0 {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let head = max_lines / 2 + max_lines % 2;
    let tail = max_lines / 2;
    let hidden = total - head - tail;

    let mut out: Vec<&str> = Vec::with_capacity(max_lines + 1);
    out.extend(&lines[..head]);
    let marker = format!("({} lines unchanged)", hidden);
    out.push(&marker);
    out.extend(&lines[total - tail..]);
    out.join("\n")
}

/// Render a hunk list as a plain-text listing for logs and previews
///
/// Each hunk gets a `[id kind]` header; changed lines carry `-`/`+`
/// prefixes, unchanged lines a two-space gutter with long spans
/// collapsed at the default threshold.
pub fn hunk_preview(hunks: &[Hunk]) -> String {
    let mut output = String::new();

    for hunk in hunks {
        let id = hunk.id.as_deref().unwrap_or("-");
        output.push_str(&format!("[{} {}]\n", id, hunk.kind.as_str()));

        match hunk.kind {
            HunkKind::Unchanged => {
                let shown = collapse_unchanged(&hunk.original, UNCHANGED_DISPLAY_THRESHOLD);
                for line in shown.split('\n') {
                    output.push_str(&format!("  {}\n", line));
                }
            }
            HunkKind::Added => {
                for line in hunk.proposed.split('\n') {
                    output.push_str(&format!("+ {}\n", line));
                }
            }
            HunkKind::Removed => {
                for line in hunk.original.split('\n') {
                    output.push_str(&format!("- {}\n", line));
                }
            }
            HunkKind::Modified => {
                for line in hunk.original.split('\n') {
                    output.push_str(&format!("- {}\n", line));
                }
                for line in hunk.proposed.split('\n') {
                    output.push_str(&format!("+ {}\n", line));
                }
            }
        }
    }

    output
}
