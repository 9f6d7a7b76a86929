//! Edit action
//!
//! An edit of published content opens a fresh revision (and, in a moderated
//! forum, a fresh approval cycle). An edit while a revision is already
//! pending overwrites that pending revision in place: the log does not grow.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::config::Config;
use crate::domains::directory::models::forum::Forum;
use crate::domains::directory::models::member::Member;
use crate::domains::moderation::actions::{ensure_can_post, ensure_writable, initial_state};
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::revision::MessageRevision;
use crate::domains::threads::models::thread::Thread;

/// Edit a message's body as its author.
pub async fn edit_message(
    message_id: MessageId,
    new_body: &str,
    actor_id: MemberId,
    config: &Config,
    pool: &PgPool,
) -> Result<MessageRevision, ForumError> {
    let message = Message::find_by_id(message_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    if message.author_id != actor_id {
        return Err(ForumError::Forbidden);
    }

    let actor = Member::find_by_id(actor_id, pool)
        .await?
        .ok_or(ForumError::MemberNotFound)?;
    ensure_can_post(&actor, config.ban_count_threshold)?;

    let thread = Thread::find_by_id(message.thread_id, pool)
        .await?
        .ok_or(ForumError::ThreadNotFound)?;
    let forum = Forum::find_by_id(thread.forum_id, pool)
        .await?
        .ok_or(ForumError::ForumNotFound)?;
    ensure_writable(&forum)?;

    let newest = MessageRevision::newest(message.id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;

    let revision = if newest.is_published() {
        // Fresh revision, fresh moderation decision
        let state = initial_state(&forum, actor.id);
        MessageRevision::append(message.id, new_body, state, pool).await?
    } else {
        // A pending edit replaces the pending edit before it
        MessageRevision::overwrite_pending(message.id, new_body, pool)
            .await?
            .ok_or(ForumError::MessageAlreadyPublished)?
    };
    Message::touch(message.id, pool).await?;

    info!(
        message_id = %message.id,
        revision_id = %revision.id,
        state = %revision.state,
        "Message edited"
    );

    Ok(revision)
}
