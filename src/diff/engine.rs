use serde::{Deserialize, Serialize};
use similar::{DiffTag, TextDiff};

use crate::utils::line_count;

/// Classification of a contiguous diff span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl HunkKind {
    /// Whether hunks of this kind occupy lines in the original document
    pub fn in_original(self) -> bool {
        matches!(self, HunkKind::Unchanged | HunkKind::Modified | HunkKind::Removed)
    }

    /// Whether hunks of this kind occupy lines in the proposed document
    pub fn in_new(self) -> bool {
        matches!(self, HunkKind::Unchanged | HunkKind::Modified | HunkKind::Added)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HunkKind::Unchanged => "unchanged",
            HunkKind::Added => "added",
            HunkKind::Removed => "removed",
            HunkKind::Modified => "modified",
        }
    }
}

/// An inclusive 1-indexed line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: u32,
    pub end: u32,
}

impl LineSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// A contiguous span of the diff between an original and a proposed document
///
/// Concatenating the `original` fields of a hunk list (joined with `\n`)
/// reproduces the original document exactly; likewise `proposed` and the
/// proposed document. `id` and the span fields are absent until the list
/// passes through [`annotate`](crate::diff::annotate::annotate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// What happened to this span
    pub kind: HunkKind,
    /// Text before the change (empty for `Added`)
    pub original: String,
    /// Text after the change (empty for `Removed`)
    pub proposed: String,
    /// Stable identifier ("h1", "h2", ...), assigned by annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Lines occupied in the original document (absent for `Added`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_span: Option<LineSpan>,
    /// Lines occupied in the proposed document (absent for `Removed`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_span: Option<LineSpan>,
}

impl Hunk {
    pub fn new(kind: HunkKind, original: &str, proposed: &str) -> Self {
        Self {
            kind,
            original: original.to_string(),
            proposed: proposed.to_string(),
            id: None,
            original_span: None,
            new_span: None,
        }
    }
}

/// Tally of a hunk list, including line totals for "+N -M" badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl ChangeCounts {
    /// Number of hunks that require a review decision
    pub fn changed(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

/// Tally hunk kinds and line totals over a hunk list
pub fn count_changes(hunks: &[Hunk]) -> ChangeCounts {
    let mut counts = ChangeCounts::default();
    for hunk in hunks {
        match hunk.kind {
            HunkKind::Unchanged => counts.unchanged += 1,
            HunkKind::Added => counts.added += 1,
            HunkKind::Removed => counts.removed += 1,
            HunkKind::Modified => counts.modified += 1,
        }
        if hunk.kind.in_new() && hunk.kind != HunkKind::Unchanged {
            counts.lines_added += line_count(&hunk.proposed);
        }
        if hunk.kind.in_original() && hunk.kind != HunkKind::Unchanged {
            counts.lines_removed += line_count(&hunk.original);
        }
    }
    counts
}

/// Compute the line-level diff between an original and a proposed document
///
/// Documents are split on `\n` only, so indentation, trailing whitespace,
/// and trailing-newline structure survive a round trip through the hunk
/// list. Wholly empty, wholly added, wholly removed, and identical inputs
/// short-circuit to at most one hunk with the text carried verbatim.
pub fn compute_line_diff(original: &str, proposed: &str) -> Vec<Hunk> {
    if original.is_empty() && proposed.is_empty() {
        return Vec::new();
    }
    if original.is_empty() {
        return vec![Hunk::new(HunkKind::Added, "", proposed)];
    }
    if proposed.is_empty() {
        return vec![Hunk::new(HunkKind::Removed, original, "")];
    }
    if original == proposed {
        return vec![Hunk::new(HunkKind::Unchanged, original, proposed)];
    }

    let old_lines: Vec<&str> = original.split('\n').collect();
    let new_lines: Vec<&str> = proposed.split('\n').collect();

    let diff = TextDiff::from_slices(&old_lines, &new_lines);

    let mut hunks = Vec::with_capacity(diff.ops().len());
    for op in diff.ops() {
        let kind = match op.tag() {
            DiffTag::Equal => HunkKind::Unchanged,
            DiffTag::Replace => HunkKind::Modified,
            DiffTag::Delete => HunkKind::Removed,
            DiffTag::Insert => HunkKind::Added,
        };
        let original_text = old_lines[op.old_range()].join("\n");
        let proposed_text = new_lines[op.new_range()].join("\n");
        hunks.push(Hunk::new(kind, &original_text, &proposed_text));
    }

    merge_adjacent(hunks)
}

/// Merge consecutive hunks of identical kind
///
/// Guards against over-fragmented alignments; an empty side contributes
/// nothing to the join.
fn merge_adjacent(hunks: Vec<Hunk>) -> Vec<Hunk> {
    let mut merged: Vec<Hunk> = Vec::with_capacity(hunks.len());

    for hunk in hunks {
        match merged.last_mut() {
            Some(prev) if prev.kind == hunk.kind => {
                prev.original = join_side(&prev.original, &hunk.original);
                prev.proposed = join_side(&prev.proposed, &hunk.proposed);
            }
            _ => merged.push(hunk),
        }
    }

    merged
}

fn join_side(a: &str, b: &str) -> String {
    if a.is_empty() {
        b.to_string()
    } else if b.is_empty() {
        a.to_string()
    } else {
        format!("{}\n{}", a, b)
    }
}
