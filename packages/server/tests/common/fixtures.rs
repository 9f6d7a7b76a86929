//! Test fixtures for creating test data.
//!
//! These fixtures use the model and action methods directly to create test
//! data. Usernames get a UUID suffix so each test sees fresh members.

use anyhow::Result;
use forum_core::config::Config;
use forum_core::domains::directory::models::forum::{Forum, ForumKind};
use forum_core::domains::directory::models::member::{Member, MemberRole};
use forum_core::domains::threads::actions::create_thread;
use forum_core::domains::threads::models::create::NewThread;
use forum_core::domains::threads::models::message::Message;
use forum_core::domains::threads::models::thread::{Thread, ThreadPriority};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a regular member with a unique username
pub async fn create_member(pool: &PgPool, prefix: &str) -> Result<Member> {
    let username = format!("{}-{}", prefix, Uuid::new_v4());
    Member::create(&username, MemberRole::User, pool).await
}

/// Create a superuser member with a unique username
pub async fn create_superuser(pool: &PgPool) -> Result<Member> {
    let username = format!("super-{}", Uuid::new_v4());
    Member::create(&username, MemberRole::Superuser, pool).await
}

/// Create a forum owned by `owner`
pub async fn create_forum(pool: &PgPool, kind: ForumKind, owner: &Member) -> Result<Forum> {
    Forum::create("Test Forum", kind, owner.id, pool).await
}

/// Create a thread through the real creation action.
///
/// In an unmoderated forum (or authored by the forum owner) the root comes
/// out published and ready for comments.
pub async fn create_thread_fixture(
    forum: &Forum,
    author: &Member,
    subject: &str,
    body: &str,
    config: &Config,
    pool: &PgPool,
) -> Result<(Thread, Message)> {
    let args = NewThread::builder()
        .forum_id(forum.id)
        .author_id(author.id)
        .subject(subject)
        .body(body)
        .priority(ThreadPriority::Normal)
        .tags(vec!["test".to_string()])
        .build();
    let created = create_thread(args, config, pool).await?;
    Ok(created)
}
