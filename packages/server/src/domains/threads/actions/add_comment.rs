//! Comment creation action
//!
//! Comments attach under an existing message and inherit its thread. Only
//! published messages take comments; the new comment's own state is decided
//! against the thread's forum owner, not the parent's author.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::config::Config;
use crate::domains::directory::models::forum::Forum;
use crate::domains::directory::models::member::Member;
use crate::domains::moderation::actions::{ensure_can_post, ensure_writable, initial_state};
use crate::domains::threads::models::create::create_comment;
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::revision::MessageRevision;
use crate::domains::threads::models::thread::Thread;

/// Add a comment under `parent_id`.
pub async fn add_comment(
    parent_id: MessageId,
    author_id: MemberId,
    body: &str,
    config: &Config,
    pool: &PgPool,
) -> Result<Message, ForumError> {
    let parent = Message::find_by_id(parent_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;

    let newest = MessageRevision::newest(parent.id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    if !newest.is_published() {
        return Err(ForumError::MessageNotPublished);
    }

    let thread = Thread::find_by_id(parent.thread_id, pool)
        .await?
        .ok_or(ForumError::ThreadNotFound)?;
    let forum = Forum::find_by_id(thread.forum_id, pool)
        .await?
        .ok_or(ForumError::ForumNotFound)?;
    ensure_writable(&forum)?;

    let author = Member::find_by_id(author_id, pool)
        .await?
        .ok_or(ForumError::MemberNotFound)?;
    ensure_can_post(&author, config.ban_count_threshold)?;

    let state = initial_state(&forum, author.id);
    let (comment, _revision) = create_comment(&parent, author.id, body, state, pool).await?;

    info!(
        message_id = %comment.id,
        parent_id = %parent.id,
        thread_id = %thread.id,
        state = %state,
        "Comment created"
    );

    Ok(comment)
}
