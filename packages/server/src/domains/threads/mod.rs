//! Threads domain - conversation trees.
//!
//! A thread is a subject + priority + tags wrapped around a tree of
//! messages. The tree is an arena keyed by message id: each message carries
//! a parent_id (NULL for the root) and children are found by lookup, never
//! by owning references. Each message carries a newest-first revision log.

pub mod actions;
pub mod models;

pub use models::message::Message;
pub use models::revision::{MessageRevision, RevisionState};
pub use models::thread::{Thread, ThreadPriority};
