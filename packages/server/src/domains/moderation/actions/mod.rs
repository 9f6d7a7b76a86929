//! Moderation actions and the guards shared with the tree operations.

pub mod decide;
pub mod edit_message;

use crate::common::{ForumError, MemberId};
use crate::domains::directory::models::forum::Forum;
use crate::domains::directory::models::member::{BanStatus, Member};
use crate::domains::threads::models::revision::RevisionState;

/// Initial publication state for fresh content.
///
/// Unmoderated forums publish immediately, and a forum owner's own words
/// never wait for the owner's approval. Everything else starts pending.
pub fn initial_state(forum: &Forum, author_id: MemberId) -> RevisionState {
    if !forum.is_moderated() || forum.is_owned_by(author_id) {
        RevisionState::Published
    } else {
        RevisionState::Unpublished
    }
}

/// Reject banned authors before any mutation.
pub fn ensure_can_post(member: &Member, ban_count_threshold: i32) -> Result<(), ForumError> {
    match member.ban_status(ban_count_threshold) {
        BanStatus::None => Ok(()),
        BanStatus::Temporary => Err(ForumError::UserBanned),
        BanStatus::Permanent => Err(ForumError::UserPermanentlyBanned),
    }
}

/// Reject writes into a read-only forum.
pub fn ensure_writable(forum: &Forum) -> Result<(), ForumError> {
    if forum.readonly {
        Err(ForumError::ForumReadOnly)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ForumId, MemberId};
    use chrono::{Duration, Utc};

    fn forum(kind: &str, owner_id: MemberId, readonly: bool) -> Forum {
        Forum {
            id: ForumId::new(),
            title: "general".to_string(),
            kind: kind.to_string(),
            owner_id,
            readonly,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn member(ban_count: i32, banned_until: Option<chrono::DateTime<Utc>>) -> Member {
        Member {
            id: MemberId::new(),
            username: "someone".to_string(),
            role: "user".to_string(),
            banned_until,
            ban_count,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unmoderated_forum_publishes_immediately() {
        let owner = MemberId::new();
        let f = forum("unmoderated", owner, false);
        assert_eq!(initial_state(&f, MemberId::new()), RevisionState::Published);
    }

    #[test]
    fn test_owner_bypasses_moderation() {
        let owner = MemberId::new();
        let f = forum("moderated", owner, false);
        assert_eq!(initial_state(&f, owner), RevisionState::Published);
    }

    #[test]
    fn test_non_owner_in_moderated_forum_is_pending() {
        let f = forum("moderated", MemberId::new(), false);
        assert_eq!(
            initial_state(&f, MemberId::new()),
            RevisionState::Unpublished
        );
    }

    #[test]
    fn test_ensure_can_post_rejects_bans() {
        assert!(ensure_can_post(&member(0, None), 5).is_ok());

        let temp = member(1, Some(Utc::now() + Duration::hours(2)));
        assert!(matches!(
            ensure_can_post(&temp, 5),
            Err(ForumError::UserBanned)
        ));

        let perm = member(5, None);
        assert!(matches!(
            ensure_can_post(&perm, 5),
            Err(ForumError::UserPermanentlyBanned)
        ));
    }

    #[test]
    fn test_ensure_writable() {
        let owner = MemberId::new();
        assert!(ensure_writable(&forum("moderated", owner, false)).is_ok());
        assert!(matches!(
            ensure_writable(&forum("moderated", owner, true)),
            Err(ForumError::ForumReadOnly)
        ));
    }
}
