//! Rate / unrate actions
//!
//! Rating is an upsert per (message, member): a second rating from the same
//! member replaces the first, never stacks. Unrating a message that was
//! never rated is a quiet no-op.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ForumError, MemberId, MessageId};
use crate::domains::directory::models::member::Member;
use crate::domains::ratings::models::rating::Rating;
use crate::domains::threads::models::message::Message;

/// Rate a message 1..=5.
pub async fn rate(
    message_id: MessageId,
    member_id: MemberId,
    value: i32,
    pool: &PgPool,
) -> Result<Rating, ForumError> {
    if !(1..=5).contains(&value) {
        return Err(ForumError::RatingOutOfRange(value));
    }

    Message::find_by_id(message_id, pool)
        .await?
        .ok_or(ForumError::MessageNotFound)?;
    Member::find_by_id(member_id, pool)
        .await?
        .ok_or(ForumError::MemberNotFound)?;

    let rating = Rating::upsert(message_id, member_id, value, pool).await?;

    info!(
        message_id = %message_id,
        member_id = %member_id,
        value,
        "Message rated"
    );

    Ok(rating)
}

/// Remove a member's rating from a message. Returns whether one existed.
pub async fn unrate(
    message_id: MessageId,
    member_id: MemberId,
    pool: &PgPool,
) -> Result<bool, ForumError> {
    let removed = Rating::remove(message_id, member_id, pool).await?;

    if removed > 0 {
        info!(message_id = %message_id, member_id = %member_id, "Rating removed");
    }

    Ok(removed > 0)
}
