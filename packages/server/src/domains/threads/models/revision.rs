use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MessageId, RevisionId};

/// MessageRevision - one content version of a message.
///
/// Revisions form a newest-first log per message. While the message exists
/// the log is never empty, and at most one revision sits in the
/// 'unpublished' state (the pending slot, backed by a partial unique index).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRevision {
    pub id: RevisionId,
    pub message_id: MessageId,
    pub body: String,
    pub state: String, // 'published', 'unpublished'
    pub created_at: DateTime<Utc>,
}

/// Publication state enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevisionState {
    Published,
    Unpublished,
}

impl std::fmt::Display for RevisionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevisionState::Published => write!(f, "published"),
            RevisionState::Unpublished => write!(f, "unpublished"),
        }
    }
}

impl std::str::FromStr for RevisionState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "published" => Ok(RevisionState::Published),
            "unpublished" => Ok(RevisionState::Unpublished),
            _ => Err(anyhow::anyhow!("Invalid revision state: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl MessageRevision {
    pub fn is_published(&self) -> bool {
        self.state == "published"
    }

    /// The message's newest revision - its current content
    pub async fn newest(message_id: MessageId, pool: &PgPool) -> Result<Option<Self>> {
        let revision = sqlx::query_as::<_, MessageRevision>(
            "SELECT * FROM message_revisions
             WHERE message_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await?;
        Ok(revision)
    }

    /// Full edit history, newest first
    pub async fn list(message_id: MessageId, pool: &PgPool) -> Result<Vec<Self>> {
        let revisions = sqlx::query_as::<_, MessageRevision>(
            "SELECT * FROM message_revisions
             WHERE message_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(message_id)
        .fetch_all(pool)
        .await?;
        Ok(revisions)
    }

    /// Number of revisions in the log
    pub async fn count(message_id: MessageId, pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM message_revisions WHERE message_id = $1",
        )
        .bind(message_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Append a new newest revision.
    ///
    /// Used when a fresh moderation cycle starts (message creation, edit of
    /// a published message). Appending a second 'unpublished' revision trips
    /// the single-pending index and surfaces as a database error.
    pub async fn append(
        message_id: MessageId,
        body: &str,
        state: RevisionState,
        pool: &PgPool,
    ) -> Result<Self> {
        let revision = sqlx::query_as::<_, MessageRevision>(
            r#"
            INSERT INTO message_revisions (id, message_id, body, state)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(RevisionId::new())
        .bind(message_id)
        .bind(body)
        .bind(state.to_string())
        .fetch_one(pool)
        .await?;
        Ok(revision)
    }

    /// Replace the pending revision's body and timestamp in place.
    ///
    /// Guarded write: only touches the row currently in 'unpublished' state.
    /// Returns the updated revision, or None when the message has no pending
    /// revision (the caller decides what that means).
    pub async fn overwrite_pending(
        message_id: MessageId,
        body: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let revision = sqlx::query_as::<_, MessageRevision>(
            r#"
            UPDATE message_revisions
            SET body = $2, created_at = NOW()
            WHERE message_id = $1 AND state = 'unpublished'
            RETURNING *
            "#,
        )
        .bind(message_id)
        .bind(body)
        .fetch_optional(pool)
        .await?;
        Ok(revision)
    }

    /// Promote the newest revision to 'published'.
    ///
    /// Guarded write: no-op returning None when the newest revision is
    /// already published (concurrent approval, or nothing pending).
    pub async fn publish_newest(message_id: MessageId, pool: &PgPool) -> Result<Option<Self>> {
        let revision = sqlx::query_as::<_, MessageRevision>(
            r#"
            UPDATE message_revisions
            SET state = 'published'
            WHERE id = (
                SELECT id FROM message_revisions
                WHERE message_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            AND state = 'unpublished'
            RETURNING *
            "#,
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await?;
        Ok(revision)
    }

    /// Remove exactly the newest revision, restoring the previous one as
    /// current. Refuses to empty the log: the subquery guard keeps the last
    /// remaining revision in place (deleting the whole message is a tree
    /// operation, not a history one).
    pub async fn revoke_newest(message_id: MessageId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM message_revisions
            WHERE id = (
                SELECT id FROM message_revisions
                WHERE message_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            AND 1 < (SELECT COUNT(*) FROM message_revisions WHERE message_id = $1)
            "#,
        )
        .bind(message_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
