//! Tree operations - thread/message lifecycle.

pub mod add_comment;
pub mod change_priority;
pub mod create_thread;
pub mod delete_message;
pub mod split_branch;

pub use add_comment::add_comment;
pub use change_priority::change_priority;
pub use create_thread::create_thread;
pub use delete_message::{delete_message, delete_message_unchecked, DeleteOutcome};
pub use split_branch::split_branch;
