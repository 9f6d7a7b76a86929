// Discussion Forum - Conversation Core
//
// This crate implements the conversation-tree engine behind the forum:
// threads and their message trees, versioned edit history, the moderation
// workflow, branch splitting, cascading deletion, and rating aggregation.
// HTTP transport, sessions and registration live outside this crate; the
// operations here are plain async functions over a Postgres pool.

pub mod common;
pub mod config;
pub mod domains;

pub use config::*;
