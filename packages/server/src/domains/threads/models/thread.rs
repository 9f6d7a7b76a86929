use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ForumId, ThreadId};

use super::message::Message;

/// Thread - a conversation tree with a subject, priority and tags.
///
/// The root message is the one row in `messages` for this thread whose
/// parent_id is NULL (enforced by a partial unique index).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Thread {
    pub id: ThreadId,
    pub forum_id: ForumId,
    pub subject: String,
    pub priority: String, // 'low', 'normal', 'high'
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Thread priority enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreadPriority {
    Low,
    Normal,
    High,
}

impl std::fmt::Display for ThreadPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadPriority::Low => write!(f, "low"),
            ThreadPriority::Normal => write!(f, "normal"),
            ThreadPriority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for ThreadPriority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(ThreadPriority::Low),
            "normal" => Ok(ThreadPriority::Normal),
            "high" => Ok(ThreadPriority::High),
            _ => Err(anyhow::anyhow!("Invalid thread priority: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Thread {
    /// Find thread by ID
    pub async fn find_by_id(id: ThreadId, pool: &PgPool) -> Result<Option<Self>> {
        let thread = sqlx::query_as::<_, Thread>("SELECT * FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(thread)
    }

    /// List threads in a forum, newest first
    pub async fn list_by_forum(
        forum_id: ForumId,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let threads = sqlx::query_as::<_, Thread>(
            "SELECT * FROM threads
             WHERE forum_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(forum_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(threads)
    }

    /// The thread's root message (parent_id IS NULL)
    pub async fn root_message(&self, pool: &PgPool) -> Result<Option<Message>> {
        let root = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE thread_id = $1 AND parent_id IS NULL",
        )
        .bind(self.id)
        .fetch_optional(pool)
        .await?;
        Ok(root)
    }

    /// Update thread priority
    pub async fn set_priority(
        id: ThreadId,
        priority: ThreadPriority,
        pool: &PgPool,
    ) -> Result<Self> {
        let thread = sqlx::query_as::<_, Thread>(
            r#"
            UPDATE threads
            SET priority = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(priority.to_string())
        .fetch_one(pool)
        .await?;
        Ok(thread)
    }

    /// Delete a thread and everything under it.
    ///
    /// The messages, revisions and ratings go with it through the
    /// ON DELETE CASCADE chain; a single statement, so all-or-nothing.
    pub async fn delete(id: ThreadId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_roundtrip() {
        for (s, p) in [
            ("low", ThreadPriority::Low),
            ("normal", ThreadPriority::Normal),
            ("high", ThreadPriority::High),
        ] {
            let parsed: ThreadPriority = s.parse().unwrap();
            assert_eq!(parsed, p);
            assert_eq!(parsed.to_string(), s);
        }
        assert!("urgent".parse::<ThreadPriority>().is_err());
    }
}
