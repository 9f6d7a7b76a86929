//! Deletion action
//!
//! Deleting a root takes the whole thread with it (messages, revisions,
//! ratings). Deleting a childless comment removes just that node. A comment
//! with replies stays: the caller gets MessageHasComments.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::config::Config;
use crate::domains::directory::models::member::{BanStatus, Member};
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::thread::Thread;

/// What a deletion actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The message was a root: the entire thread is gone.
    ThreadDeleted,
    /// A childless comment was removed.
    MessageDeleted,
}

/// Delete a message as `actor_id`.
///
/// Permitted to the message's author and to superusers. Permanently banned
/// actors are rejected before the ownership check.
pub async fn delete_message(
    message_id: MessageId,
    actor_id: MemberId,
    config: &Config,
    pool: &PgPool,
) -> Result<DeleteOutcome, ForumError> {
    let message = Message::find_by_id(message_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;

    let actor = Member::find_by_id(actor_id, pool)
        .await?
        .ok_or(ForumError::MemberNotFound)?;
    if actor.ban_status(config.ban_count_threshold) == BanStatus::Permanent {
        return Err(ForumError::UserPermanentlyBanned);
    }
    if message.author_id != actor.id && !actor.is_superuser() {
        return Err(ForumError::Forbidden);
    }

    let outcome = delete_message_unchecked(&message, pool).await?;

    info!(
        message_id = %message.id,
        thread_id = %message.thread_id,
        actor_id = %actor.id,
        outcome = ?outcome,
        "Message deleted"
    );

    Ok(outcome)
}

/// Deletion without the actor checks.
///
/// Shared with moderation rejection, where the forum owner removes content
/// they do not own. Roots cascade the whole thread; comments must be
/// childless.
pub async fn delete_message_unchecked(
    message: &Message,
    pool: &PgPool,
) -> Result<DeleteOutcome, ForumError> {
    if message.is_root() {
        let deleted = Thread::delete(message.thread_id, pool).await?;
        if deleted == 0 {
            return Err(ForumError::ThreadNotFound);
        }
        return Ok(DeleteOutcome::ThreadDeleted);
    }

    let deleted = Message::delete_if_childless(message.id, pool).await?;
    if deleted == 0 {
        // The guarded delete declined: either a reply raced in or the
        // message disappeared underneath us.
        if Message::child_count(message.id, pool).await? > 0 {
            return Err(ForumError::MessageHasComments);
        }
        return Err(ForumError::MessageNotFound);
    }

    Ok(DeleteOutcome::MessageDeleted)
}
