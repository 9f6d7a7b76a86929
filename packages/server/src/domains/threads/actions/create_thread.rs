//! Thread creation action
//!
//! Opens a new conversation: one thread row, its root message, and the first
//! revision, created atomically with the publication state decided by the
//! moderation rules.

use sqlx::PgPool;
use tracing::info;

use crate::common::ForumError;
use crate::config::Config;
use crate::domains::directory::models::forum::Forum;
use crate::domains::directory::models::member::Member;
use crate::domains::moderation::actions::{ensure_can_post, ensure_writable, initial_state};
use crate::domains::threads::models::create::{create_thread_with_root, NewThread};
use crate::domains::threads::models::message::Message;
use crate::domains::threads::models::thread::Thread;

/// Create a thread with its root message.
pub async fn create_thread(
    args: NewThread<'_>,
    config: &Config,
    pool: &PgPool,
) -> Result<(Thread, Message), ForumError> {
    let forum = Forum::find_by_id(args.forum_id, pool)
        .await?
        .ok_or(ForumError::ForumNotFound)?;
    ensure_writable(&forum)?;

    let author = Member::find_by_id(args.author_id, pool)
        .await?
        .ok_or(ForumError::MemberNotFound)?;
    ensure_can_post(&author, config.ban_count_threshold)?;

    let state = initial_state(&forum, author.id);
    let (thread, root) = create_thread_with_root(args, state, pool).await?;

    info!(
        thread_id = %thread.id,
        forum_id = %forum.id,
        author_id = %author.id,
        state = %state,
        "Thread created"
    );

    Ok((thread, root))
}
