//! Branch splitting action
//!
//! Promotes a comment (with its whole subtree) into the root of a new
//! thread in the same forum. Forum-owner only.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::domains::directory::models::forum::Forum;
use crate::domains::moderation::actions::ensure_writable;
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::split::split_into_new_thread;
use crate::domains::threads::models::thread::{Thread, ThreadPriority};

/// Split the subtree rooted at `message_id` into a new thread.
pub async fn split_branch(
    message_id: MessageId,
    subject: &str,
    priority: ThreadPriority,
    tags: Vec<String>,
    actor_id: MemberId,
    pool: &PgPool,
) -> Result<Thread, ForumError> {
    let message = Message::find_by_id(message_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    if message.is_root() {
        return Err(ForumError::MessageAlreadyRoot);
    }

    let thread = Thread::find_by_id(message.thread_id, pool)
        .await?
        .ok_or(ForumError::ThreadNotFound)?;
    let forum = Forum::find_by_id(thread.forum_id, pool)
        .await?
        .ok_or(ForumError::ForumNotFound)?;
    if !forum.is_owned_by(actor_id) {
        return Err(ForumError::Forbidden);
    }
    ensure_writable(&forum)?;

    let new_thread = split_into_new_thread(message.id, subject, priority, tags, pool).await?;

    info!(
        message_id = %message.id,
        old_thread_id = %thread.id,
        new_thread_id = %new_thread.id,
        "Branch split into new thread"
    );

    Ok(new_thread)
}
