use anyhow::Result;
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::{ForumId, MemberId, MessageId, RevisionId, ThreadId};

use super::message::Message;
use super::revision::{MessageRevision, RevisionState};
use super::thread::{Thread, ThreadPriority};

/// Parameters for opening a new thread.
#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewThread<'a> {
    pub forum_id: ForumId,
    pub author_id: MemberId,
    pub subject: &'a str,
    pub body: &'a str,
    #[builder(default = ThreadPriority::Normal)]
    pub priority: ThreadPriority,
    #[builder(default)]
    pub tags: Vec<String>,
}

/// Create a thread together with its root message and first revision
/// (inserts into threads + messages + message_revisions atomically).
///
/// The publication state of the first revision is decided by the caller
/// (moderation) before this runs.
pub async fn create_thread_with_root(
    args: NewThread<'_>,
    state: RevisionState,
    pool: &PgPool,
) -> Result<(Thread, Message)> {
    // Use a transaction to insert all three rows atomically
    let mut tx = pool.begin().await?;

    let thread = sqlx::query_as::<_, Thread>(
        r#"
        INSERT INTO threads (id, forum_id, subject, priority, tags)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(ThreadId::new())
    .bind(args.forum_id)
    .bind(args.subject)
    .bind(args.priority.to_string())
    .bind(&args.tags)
    .fetch_one(&mut *tx)
    .await?;

    let root = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, thread_id, author_id, parent_id)
        VALUES ($1, $2, $3, NULL)
        RETURNING *
        "#,
    )
    .bind(MessageId::new())
    .bind(thread.id)
    .bind(args.author_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO message_revisions (id, message_id, body, state)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(RevisionId::new())
    .bind(root.id)
    .bind(args.body)
    .bind(state.to_string())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((thread, root))
}

/// Create a comment under an existing message together with its first
/// revision (inserts into messages + message_revisions atomically).
pub async fn create_comment(
    parent: &Message,
    author_id: MemberId,
    body: &str,
    state: RevisionState,
    pool: &PgPool,
) -> Result<(Message, MessageRevision)> {
    let mut tx = pool.begin().await?;

    let comment = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, thread_id, author_id, parent_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(MessageId::new())
    .bind(parent.thread_id)
    .bind(author_id)
    .bind(parent.id)
    .fetch_one(&mut *tx)
    .await?;

    let revision = sqlx::query_as::<_, MessageRevision>(
        r#"
        INSERT INTO message_revisions (id, message_id, body, state)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(RevisionId::new())
    .bind(comment.id)
    .bind(body)
    .bind(state.to_string())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((comment, revision))
}
