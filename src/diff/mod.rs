pub mod annotate;
pub mod engine;
pub mod render;

pub use annotate::annotate;
pub use engine::{compute_line_diff, count_changes, ChangeCounts, Hunk, HunkKind, LineSpan};
