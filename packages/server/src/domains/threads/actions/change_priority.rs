//! Priority change action
//!
//! Only the author of the thread's root message may re-prioritize it.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, ThreadId};
use crate::domains::threads::models::thread::{Thread, ThreadPriority};

/// Change a thread's priority.
pub async fn change_priority(
    thread_id: ThreadId,
    priority: ThreadPriority,
    actor_id: MemberId,
    pool: &PgPool,
) -> Result<Thread, ForumError> {
    let thread = Thread::find_by_id(thread_id, pool)
        .await?
        .ok_or(ForumError::ThreadNotFound)?;

    let root = thread
        .root_message(pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    if root.author_id != actor_id {
        return Err(ForumError::Forbidden);
    }

    let updated = Thread::set_priority(thread.id, priority, pool).await?;

    info!(thread_id = %updated.id, priority = %priority, "Thread priority changed");

    Ok(updated)
}
