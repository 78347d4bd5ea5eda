pub mod diff;
pub mod document;
pub mod review;
pub mod utils;

pub use diff::{annotate, compute_line_diff, count_changes, ChangeCounts, Hunk, HunkKind, LineSpan};
pub use document::Document;
pub use review::{
    apply_decisions, HunkCounts, HunkState, HunkStatus, ReviewError, ReviewSession, SessionStore,
};
