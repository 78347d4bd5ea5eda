pub mod reconstruct;
pub mod session;
pub mod store;

pub use reconstruct::{apply_decisions, ReviewError};
pub use session::{ContentSnapshot, HunkCounts, HunkState, HunkStatus, ReviewSession};
pub use store::SessionStore;
