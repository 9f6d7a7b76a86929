//! Approval decision action
//!
//! The forum owner resolves a pending revision. Approval publishes it.
//! Rejection of an edit revokes just that revision, restoring the previous
//! content; rejection of a never-published message removes the message
//! itself (the whole thread when it was the root).

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::domains::directory::models::forum::Forum;
use crate::domains::threads::actions::delete_message::{
    delete_message_unchecked, DeleteOutcome,
};
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::revision::MessageRevision;
use crate::domains::threads::models::thread::Thread;

/// What resolving a pending revision did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecideOutcome {
    /// The pending revision is now published.
    Approved,
    /// A rejected edit was revoked; the prior published content is current
    /// again.
    RevisionRevoked,
    /// A rejected first version took its (childless) message with it.
    MessageDeleted,
    /// A rejected first version was the thread's root; the thread is gone.
    ThreadDeleted,
}

/// Approve or reject a message's pending revision as the forum owner.
pub async fn decide(
    message_id: MessageId,
    approve: bool,
    actor_id: MemberId,
    pool: &PgPool,
) -> Result<DecideOutcome, ForumError> {
    let message = Message::find_by_id(message_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    let thread = Thread::find_by_id(message.thread_id, pool)
        .await?
        .ok_or(ForumError::ThreadNotFound)?;
    let forum = Forum::find_by_id(thread.forum_id, pool)
        .await?
        .ok_or(ForumError::ForumNotFound)?;
    if !forum.is_owned_by(actor_id) {
        return Err(ForumError::Forbidden);
    }

    let newest = MessageRevision::newest(message.id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    if newest.is_published() {
        return Err(ForumError::MessageAlreadyPublished);
    }

    let outcome = if approve {
        // Guarded promotion; a concurrent approval leaves nothing to do
        MessageRevision::publish_newest(message.id, pool)
            .await?
            .ok_or(ForumError::MessageAlreadyPublished)?;
        DecideOutcome::Approved
    } else if MessageRevision::count(message.id, pool).await? <= 1 {
        // First version was never published: the message goes away.
        // A never-published comment cannot legitimately have replies (they
        // require a published parent); if one does, deletion refuses with
        // MessageHasComments rather than orphaning the subtree.
        match delete_message_unchecked(&message, pool).await? {
            DeleteOutcome::ThreadDeleted => DecideOutcome::ThreadDeleted,
            DeleteOutcome::MessageDeleted => DecideOutcome::MessageDeleted,
        }
    } else {
        let revoked = MessageRevision::revoke_newest(message.id, pool).await?;
        if revoked == 0 {
            // Someone else already collapsed the log
            return Err(ForumError::MessageAlreadyPublished);
        }
        DecideOutcome::RevisionRevoked
    };

    info!(
        message_id = %message.id,
        forum_id = %forum.id,
        approve,
        outcome = ?outcome,
        "Moderation decision applied"
    );

    Ok(outcome)
}
