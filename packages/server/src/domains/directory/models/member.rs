use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::MemberId;

/// A forum member.
///
/// Ban bookkeeping (incrementing ban_count, setting banned_until) belongs to
/// the external moderation tooling; this crate only classifies the result.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub role: String, // 'user', 'superuser'
    pub banned_until: Option<DateTime<Utc>>,
    pub ban_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Member role enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    User,
    Superuser,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRole::User => write!(f, "user"),
            MemberRole::Superuser => write!(f, "superuser"),
        }
    }
}

impl std::str::FromStr for MemberRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(MemberRole::User),
            "superuser" => Ok(MemberRole::Superuser),
            _ => Err(anyhow::anyhow!("Invalid member role: {}", s)),
        }
    }
}

/// Current standing of a member, derived from the ban fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanStatus {
    /// Free to act.
    None,
    /// banned_until lies in the future.
    Temporary,
    /// ban_count reached the configured threshold.
    Permanent,
}

impl Member {
    /// Classify this member's ban standing.
    ///
    /// A permanent ban (ban_count at or over the threshold) dominates any
    /// remaining temporary ban window.
    pub fn ban_status(&self, ban_count_threshold: i32) -> BanStatus {
        if self.ban_count >= ban_count_threshold {
            return BanStatus::Permanent;
        }
        match self.banned_until {
            Some(until) if until > Utc::now() => BanStatus::Temporary,
            _ => BanStatus::None,
        }
    }

    pub fn is_superuser(&self) -> bool {
        self.role == "superuser"
    }

    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(member)
    }

    /// Insert a new member (fixtures and tests; registration is external)
    pub async fn create(username: &str, role: MemberRole, pool: &PgPool) -> Result<Self> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, username, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(MemberId::new())
        .bind(username)
        .bind(role.to_string())
        .fetch_one(pool)
        .await?;
        Ok(member)
    }

    /// Set the ban fields directly (fixtures and tests; ban issuing is external)
    pub async fn set_ban_state(
        id: MemberId,
        banned_until: Option<DateTime<Utc>>,
        ban_count: i32,
        pool: &PgPool,
    ) -> Result<Self> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET banned_until = $2, ban_count = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(banned_until)
        .bind(ban_count)
        .fetch_one(pool)
        .await?;
        Ok(member)
    }
}
