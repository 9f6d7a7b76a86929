use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, MessageId, ThreadId};

/// Message - one node in a conversation tree.
///
/// A root message (parent_id IS NULL) opens its thread; every other message
/// is a comment. Content lives in `message_revisions`, never here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: MessageId,
    pub thread_id: ThreadId,
    pub author_id: MemberId,
    pub parent_id: Option<MessageId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Message {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Find message by ID
    pub async fn find_by_id(id: MessageId, pool: &PgPool) -> Result<Option<Self>> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(message)
    }

    /// Direct children of a message, newest first
    pub async fn children(&self, pool: &PgPool) -> Result<Vec<Self>> {
        let children = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages
             WHERE parent_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(self.id)
        .fetch_all(pool)
        .await?;
        Ok(children)
    }

    /// Number of direct children
    pub async fn child_count(id: MessageId, pool: &PgPool) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE parent_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// All message ids in the subtree rooted at `id`, including `id` itself
    pub async fn subtree_ids(id: MessageId, pool: &PgPool) -> Result<Vec<MessageId>> {
        let ids = sqlx::query_scalar::<_, MessageId>(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM messages WHERE id = $1
                UNION ALL
                SELECT m.id FROM messages m JOIN subtree s ON m.parent_id = s.id
            )
            SELECT id FROM subtree
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(ids)
    }

    /// Update the edit timestamp
    pub async fn touch(id: MessageId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE messages SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a single message node, but only while it has no children.
    ///
    /// Guarded write: the NOT EXISTS clause makes the has-children check and
    /// the delete one atomic statement, so a comment racing in cannot be
    /// cascaded away. Returns the number of rows deleted (0 means the
    /// message is gone or grew a child; the caller sorts out which).
    pub async fn delete_if_childless(id: MessageId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM messages c WHERE c.parent_id = $1)
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
