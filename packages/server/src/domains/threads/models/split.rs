use anyhow::Result;
use sqlx::PgPool;

use crate::common::{MessageId, ThreadId};

use super::thread::{Thread, ThreadPriority};

/// Detach a comment's subtree into a brand-new thread.
///
/// Inserts the new thread, re-homes the subtree (recursive CTE over
/// parent_id), and nulls the split point's parent reference, all in one
/// transaction. Parent/child links inside the subtree are untouched; the old
/// thread simply stops listing the subtree under the former parent.
///
/// The new thread inherits the forum of the old one. Authorization and the
/// not-already-a-root check belong to the calling action.
pub async fn split_into_new_thread(
    message_id: MessageId,
    subject: &str,
    priority: ThreadPriority,
    tags: Vec<String>,
    pool: &PgPool,
) -> Result<Thread> {
    let mut tx = pool.begin().await?;

    let new_thread = sqlx::query_as::<_, Thread>(
        r#"
        INSERT INTO threads (id, forum_id, subject, priority, tags)
        SELECT $1, t.forum_id, $2, $3, $4
        FROM threads t
        JOIN messages m ON m.thread_id = t.id
        WHERE m.id = $5
        RETURNING *
        "#,
    )
    .bind(ThreadId::new())
    .bind(subject)
    .bind(priority.to_string())
    .bind(&tags)
    .bind(message_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        WITH RECURSIVE subtree AS (
            SELECT id FROM messages WHERE id = $1
            UNION ALL
            SELECT m.id FROM messages m JOIN subtree s ON m.parent_id = s.id
        )
        UPDATE messages
        SET thread_id = $2
        WHERE id IN (SELECT id FROM subtree)
        "#,
    )
    .bind(message_id)
    .bind(new_thread.id)
    .execute(&mut *tx)
    .await?;

    // The split point becomes the new thread's root
    sqlx::query("UPDATE messages SET parent_id = NULL, updated_at = NOW() WHERE id = $1")
        .bind(message_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(new_thread)
}
