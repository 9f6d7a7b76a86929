//! Typed ID definitions for all domain entities.
//!
//! One alias per entity, providing compile-time type safety for ID usage
//! throughout the crate. Mixing two kinds of ID is a compile error.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (forum users).
pub struct Member;

/// Marker type for Forum entities.
pub struct Forum;

/// Marker type for Thread entities (conversation trees).
pub struct Thread;

/// Marker type for Message entities (tree nodes: roots and comments).
pub struct Message;

/// Marker type for MessageRevision entities (versioned message content).
pub struct MessageRevision;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Forum entities.
pub type ForumId = Id<Forum>;

/// Typed ID for Thread entities.
pub type ThreadId = Id<Thread>;

/// Typed ID for Message entities.
pub type MessageId = Id<Message>;

/// Typed ID for MessageRevision entities.
pub type RevisionId = Id<MessageRevision>;
