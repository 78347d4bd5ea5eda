//! Shared utility functions and constants

/// Unchanged hunks longer than this many lines are collapsed for display
pub const UNCHANGED_DISPLAY_THRESHOLD: usize = 5;

/// Default maximum review session age before cleanup, in seconds
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 3600;

/// Title used when a document has a blank or missing title
pub const UNTITLED_FALLBACK: &str = "Untitled note";

/// Number of bytes to use from SHA256 hash for content hashing
pub const CONTENT_HASH_BYTES: usize = 16;

/// Length of content previews in log events
pub const LOG_PREVIEW_LEN: usize = 60;

/// Truncate a string to max byte length, adding "..." if truncated
///
/// The cut is floored to a char boundary so multi-byte input never
/// panics the slice.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

/// Number of lines a hunk side occupies.
///
/// Hunk sides store lines joined with `\n`, so the empty string means
/// zero lines, not one empty line.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Hex encoding utilities
pub mod hex {
    /// Encode bytes as hex string
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
