//! Integration tests for the moderation workflow.
//!
//! Initial publication state, owner decisions (approve / reject), edit
//! re-entry into moderation, and the guards around all of it.

mod common;

use crate::common::{create_forum, create_member, create_thread_fixture, TestHarness, TEST_BAN_THRESHOLD};
use chrono::{Duration, Utc};
use forum_core::common::ForumError;
use forum_core::domains::directory::models::forum::{Forum, ForumKind};
use forum_core::domains::directory::models::member::Member;
use forum_core::domains::moderation::actions::decide::{decide, DecideOutcome};
use forum_core::domains::moderation::actions::edit_message::edit_message;
use forum_core::domains::threads::models::revision::MessageRevision;
use forum_core::domains::threads::models::thread::Thread;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn unmoderated_forum_publishes_immediately(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Unmoderated, &owner)
        .await
        .unwrap();

    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(newest.is_published());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn forum_owner_bypasses_moderation(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();

    let (_thread, root) =
        create_thread_fixture(&forum, &owner, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(newest.is_published());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_owner_in_moderated_forum_starts_pending(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();

    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(!newest.is_published());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approve_publishes_and_repeat_decision_conflicts(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let outcome = decide(root.id, true, owner.id, &ctx.db_pool).await.unwrap();
    assert_eq!(outcome, DecideOutcome::Approved);

    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(newest.is_published());

    let again = decide(root.id, true, owner.id, &ctx.db_pool).await;
    assert!(matches!(again, Err(ForumError::MessageAlreadyPublished)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn decide_requires_the_forum_owner(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let stranger = create_member(&ctx.db_pool, "stranger").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let result = decide(root.id, true, stranger.id, &ctx.db_pool).await;
    assert!(matches!(result, Err(ForumError::Forbidden)));

    // The author cannot approve their own message either
    let result = decide(root.id, true, author.id, &ctx.db_pool).await;
    assert!(matches!(result, Err(ForumError::Forbidden)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejecting_a_never_published_root_deletes_the_thread(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();
    let (thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let outcome = decide(root.id, false, owner.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(outcome, DecideOutcome::ThreadDeleted);

    assert!(Thread::find_by_id(thread.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        MessageRevision::count(root.id, &ctx.db_pool).await.unwrap(),
        0
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn edit_of_published_message_appends_then_overwrites(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "version one", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();
    decide(root.id, true, owner.id, &ctx.db_pool).await.unwrap();

    // First edit re-enters moderation as a second revision
    let revision = edit_message(root.id, "version two", author.id, &ctx.config, &ctx.db_pool)
        .await
        .unwrap();
    assert!(!revision.is_published());
    assert_eq!(
        MessageRevision::count(root.id, &ctx.db_pool).await.unwrap(),
        2
    );

    // The prior published content is still in the log
    let log = MessageRevision::list(root.id, &ctx.db_pool).await.unwrap();
    assert_eq!(log[1].body, "version one");
    assert!(log[1].is_published());

    // A second edit before approval replaces the pending revision
    edit_message(root.id, "version three", author.id, &ctx.config, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(
        MessageRevision::count(root.id, &ctx.db_pool).await.unwrap(),
        2
    );
    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(newest.body, "version three");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn edit_requires_the_author(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Unmoderated, &owner)
        .await
        .unwrap();
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    let result = edit_message(root.id, "hijacked", owner.id, &ctx.config, &ctx.db_pool).await;
    assert!(matches!(result, Err(ForumError::Forbidden)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn banned_authors_cannot_create(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Unmoderated, &owner)
        .await
        .unwrap();

    // Temporary ban
    Member::set_ban_state(
        author.id,
        Some(Utc::now() + Duration::hours(1)),
        1,
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let result =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool).await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ForumError>(),
        Some(ForumError::UserBanned)
    ));

    // Permanent ban dominates
    Member::set_ban_state(author.id, None, TEST_BAN_THRESHOLD, &ctx.db_pool)
        .await
        .unwrap();
    let result =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool).await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ForumError>(),
        Some(ForumError::UserPermanentlyBanned)
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn readonly_forum_rejects_creation_and_edits(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Unmoderated, &owner)
        .await
        .unwrap();
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "hello", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();

    Forum::set_readonly(forum.id, true, &ctx.db_pool)
        .await
        .unwrap();

    let result =
        create_thread_fixture(&forum, &author, "Another", "hello", &ctx.config, &ctx.db_pool).await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ForumError>(),
        Some(ForumError::ForumReadOnly)
    ));

    let result = edit_message(root.id, "edited", author.id, &ctx.config, &ctx.db_pool).await;
    assert!(matches!(result, Err(ForumError::ForumReadOnly)));
}

/// The end-to-end moderated-forum scenario: pending creation, approval,
/// edit re-entry, rejection of the edit.
#[test_context(TestHarness)]
#[tokio::test]
async fn moderation_round_trip(ctx: &TestHarness) {
    let owner = create_member(&ctx.db_pool, "owner").await.unwrap();
    let author = create_member(&ctx.db_pool, "author").await.unwrap();
    let forum = create_forum(&ctx.db_pool, ForumKind::Moderated, &owner)
        .await
        .unwrap();

    // Created by a non-owner: pending
    let (_thread, root) =
        create_thread_fixture(&forum, &author, "Subject", "approved text", &ctx.config, &ctx.db_pool)
            .await
            .unwrap();
    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(!newest.is_published());

    // Owner approves: published
    decide(root.id, true, owner.id, &ctx.db_pool).await.unwrap();

    // Author edits: history grows to 2, newest pending
    edit_message(root.id, "contested edit", author.id, &ctx.config, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(
        MessageRevision::count(root.id, &ctx.db_pool).await.unwrap(),
        2
    );

    // Owner rejects the edit: back to the approved content, message intact
    let outcome = decide(root.id, false, owner.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(outcome, DecideOutcome::RevisionRevoked);
    assert_eq!(
        MessageRevision::count(root.id, &ctx.db_pool).await.unwrap(),
        1
    );
    let newest = MessageRevision::newest(root.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(newest.body, "approved text");
    assert!(newest.is_published());
}
