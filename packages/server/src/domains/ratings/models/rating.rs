use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, MessageId};

/// Rating - one member's 1..5 score on one message.
///
/// Keyed by (message, member): a member rates a message at most once, and
/// rating again overwrites the earlier value.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub message_id: MessageId,
    pub member_id: MemberId,
    pub value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived rating aggregate for a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct RatingAggregate {
    /// Mean of the active ratings; 0.0 when nobody has rated.
    pub average: f64,
    /// Number of distinct raters.
    pub rated: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Rating {
    /// Find a member's rating on a message
    pub async fn find(
        message_id: MessageId,
        member_id: MemberId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let rating = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE message_id = $1 AND member_id = $2",
        )
        .bind(message_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;
        Ok(rating)
    }

    /// Upsert a rating: insert on first rating, overwrite on re-rating
    pub async fn upsert(
        message_id: MessageId,
        member_id: MemberId,
        value: i32,
        pool: &PgPool,
    ) -> Result<Self> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (message_id, member_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (message_id, member_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(message_id)
        .bind(member_id)
        .bind(value)
        .fetch_one(pool)
        .await?;
        Ok(rating)
    }

    /// Remove a rating; no-op when there is none
    pub async fn remove(
        message_id: MessageId,
        member_id: MemberId,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM ratings WHERE message_id = $1 AND member_id = $2")
            .bind(message_id)
            .bind(member_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Aggregate a message's ratings.
    ///
    /// Computed from the stored rows on every read, so it always matches a
    /// fresh recomputation.
    pub async fn aggregate(message_id: MessageId, pool: &PgPool) -> Result<RatingAggregate> {
        let aggregate = sqlx::query_as::<_, RatingAggregate>(
            r#"
            SELECT
                COALESCE(AVG(value), 0)::FLOAT8 AS average,
                COUNT(*) AS rated
            FROM ratings
            WHERE message_id = $1
            "#,
        )
        .bind(message_id)
        .fetch_one(pool)
        .await?;
        Ok(aggregate)
    }
}
