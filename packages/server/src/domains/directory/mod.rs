//! Directory domain - members and forums.
//!
//! Registration, login, sessions and forum administration are handled
//! outside this crate; the conversation core only reads these rows (plus
//! test fixtures that materialize them).

pub mod models;

pub use models::forum::{Forum, ForumKind};
pub use models::member::{BanStatus, Member, MemberRole};
