use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ForumId, MemberId, MessageId, Page};

/// What a report ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Every message on the server.
    Server,
    /// Messages in one forum's threads.
    Forum(ForumId),
}

/// One message's standing in the rating report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRatingRow {
    pub message_id: MessageId,
    pub is_root: bool,
    /// Mean of the message's ratings; 0.0 when unrated.
    pub rating: f64,
    /// Number of distinct raters.
    pub rated: i64,
}

/// One member's standing in the rating report.
///
/// `rating` is the flat mean over all individual ratings the member's
/// messages received (not a mean of per-message means); `rated` counts those
/// ratings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberRatingRow {
    pub member_id: MemberId,
    pub username: String,
    pub rating: f64,
    pub rated: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl MessageRatingRow {
    /// Every message in scope, zero-rated ones included, ordered by rating
    /// descending with ascending message id as the tie-break.
    pub async fn report(scope: ReportScope, page: Page, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = match scope {
            ReportScope::Server => {
                sqlx::query_as::<_, MessageRatingRow>(
                    r#"
                    SELECT
                        m.id AS message_id,
                        (m.parent_id IS NULL) AS is_root,
                        COALESCE(AVG(r.value), 0)::FLOAT8 AS rating,
                        COUNT(r.value) AS rated
                    FROM messages m
                    LEFT JOIN ratings r ON r.message_id = m.id
                    GROUP BY m.id
                    ORDER BY rating DESC, m.id ASC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(pool)
                .await?
            }
            ReportScope::Forum(forum_id) => {
                sqlx::query_as::<_, MessageRatingRow>(
                    r#"
                    SELECT
                        m.id AS message_id,
                        (m.parent_id IS NULL) AS is_root,
                        COALESCE(AVG(r.value), 0)::FLOAT8 AS rating,
                        COUNT(r.value) AS rated
                    FROM messages m
                    JOIN threads t ON t.id = m.thread_id
                    LEFT JOIN ratings r ON r.message_id = m.id
                    WHERE t.forum_id = $1
                    GROUP BY m.id
                    ORDER BY rating DESC, m.id ASC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(forum_id)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(pool)
                .await?
            }
        };
        Ok(rows)
    }
}

impl MemberRatingRow {
    /// Every member owning at least one message in scope, zero-rated members
    /// included, same ordering discipline keyed on member id.
    pub async fn report(scope: ReportScope, page: Page, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = match scope {
            ReportScope::Server => {
                sqlx::query_as::<_, MemberRatingRow>(
                    r#"
                    SELECT
                        mem.id AS member_id,
                        mem.username,
                        COALESCE(AVG(r.value), 0)::FLOAT8 AS rating,
                        COUNT(r.value) AS rated
                    FROM members mem
                    JOIN messages m ON m.author_id = mem.id
                    LEFT JOIN ratings r ON r.message_id = m.id
                    GROUP BY mem.id, mem.username
                    ORDER BY rating DESC, mem.id ASC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(pool)
                .await?
            }
            ReportScope::Forum(forum_id) => {
                sqlx::query_as::<_, MemberRatingRow>(
                    r#"
                    SELECT
                        mem.id AS member_id,
                        mem.username,
                        COALESCE(AVG(r.value), 0)::FLOAT8 AS rating,
                        COUNT(r.value) AS rated
                    FROM members mem
                    JOIN messages m ON m.author_id = mem.id
                    JOIN threads t ON t.id = m.thread_id
                    LEFT JOIN ratings r ON r.message_id = m.id
                    WHERE t.forum_id = $1
                    GROUP BY mem.id, mem.username
                    ORDER BY rating DESC, mem.id ASC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(forum_id)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(pool)
                .await?
            }
        };
        Ok(rows)
    }
}
