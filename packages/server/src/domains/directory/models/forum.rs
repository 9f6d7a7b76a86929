use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ForumId, MemberId};

/// A forum - the container threads are created in.
///
/// Forum CRUD is external; the core reads the kind/owner/readonly flags to
/// drive moderation and write guards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Forum {
    pub id: ForumId,
    pub title: String,
    pub kind: String, // 'moderated', 'unmoderated'
    pub owner_id: MemberId,
    pub readonly: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Forum kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForumKind {
    Moderated,
    Unmoderated,
}

impl std::fmt::Display for ForumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForumKind::Moderated => write!(f, "moderated"),
            ForumKind::Unmoderated => write!(f, "unmoderated"),
        }
    }
}

impl std::str::FromStr for ForumKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "moderated" => Ok(ForumKind::Moderated),
            "unmoderated" => Ok(ForumKind::Unmoderated),
            _ => Err(anyhow::anyhow!("Invalid forum kind: {}", s)),
        }
    }
}

impl Forum {
    pub fn is_moderated(&self) -> bool {
        self.kind == "moderated"
    }

    pub fn is_owned_by(&self, member_id: MemberId) -> bool {
        self.owner_id == member_id
    }

    /// Find forum by ID
    pub async fn find_by_id(id: ForumId, pool: &PgPool) -> Result<Option<Self>> {
        let forum = sqlx::query_as::<_, Forum>("SELECT * FROM forums WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(forum)
    }

    /// Insert a new forum (fixtures and tests; forum administration is external)
    pub async fn create(
        title: &str,
        kind: ForumKind,
        owner_id: MemberId,
        pool: &PgPool,
    ) -> Result<Self> {
        let forum = sqlx::query_as::<_, Forum>(
            r#"
            INSERT INTO forums (id, title, kind, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(ForumId::new())
        .bind(title)
        .bind(kind.to_string())
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
        Ok(forum)
    }

    /// Flip the readonly flag (fixtures and tests)
    pub async fn set_readonly(id: ForumId, readonly: bool, pool: &PgPool) -> Result<Self> {
        let forum = sqlx::query_as::<_, Forum>(
            r#"
            UPDATE forums
            SET readonly = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(readonly)
        .fetch_one(pool)
        .await?;
        Ok(forum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kind: ForumKind = "moderated".parse().unwrap();
        assert_eq!(kind, ForumKind::Moderated);
        assert_eq!(kind.to_string(), "moderated");
        assert!("open".parse::<ForumKind>().is_err());
    }
}
