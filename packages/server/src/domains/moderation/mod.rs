//! Moderation domain - the publication workflow.
//!
//! Content in a moderated forum starts unpublished unless the forum owner
//! wrote it; the owner then approves or rejects pending revisions. Editing
//! published content re-enters the same cycle.

pub mod actions;

pub use actions::decide::{decide, DecideOutcome};
pub use actions::edit_message::edit_message;
pub use actions::{ensure_can_post, ensure_writable, initial_state};
