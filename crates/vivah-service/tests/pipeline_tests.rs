//! Like → match → notification scenarios against the in-memory store

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{uid, Harness};
use tokio::task::JoinSet;
use vivah_core::{DomainError, NotificationKind, PairState};
use vivah_service::{
    Acknowledgement, LikePipeline, LikeStatus, MatchService, ServiceContext, ServiceError,
};

fn kinds(harness: &Harness, user: &str) -> Vec<NotificationKind> {
    harness
        .store
        .notifications_for(&uid(user))
        .into_iter()
        .map(|n| n.kind)
        .collect()
}

fn count_kind(harness: &Harness, user: &str, kind: NotificationKind) -> usize {
    kinds(harness, user).into_iter().filter(|k| *k == kind).count()
}

#[tokio::test]
async fn test_one_sided_like_notifies_liked_user() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    let outcome = pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();

    assert_eq!(outcome.status, LikeStatus::Recorded);
    assert_eq!(outcome.acknowledgement(), Acknowledgement::LikeSent);
    assert!(outcome.matched.is_none());
    assert!(outcome.notification_failures.is_empty());

    let inbox = harness.store.notifications_for(&uid("ravi"));
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Like);
    assert_eq!(inbox[0].source_id, outcome.like.id);
    assert_eq!(inbox[0].payload.other.user_id, uid("asha"));
    assert_eq!(inbox[0].payload.other.name.as_deref(), Some("Asha"));
    assert!(!inbox[0].read);

    assert!(harness.store.notifications_for(&uid("asha")).is_empty());
    assert_eq!(harness.store.match_count(), 0);
}

#[tokio::test]
async fn test_reverse_like_creates_match_and_notifies_both() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    let outcome = pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();

    assert_eq!(outcome.acknowledgement(), Acknowledgement::Matched);
    let matched = outcome.matched.as_ref().unwrap();
    assert!(matched.created);
    assert_eq!(matched.matched.user_a_id, uid("asha"));
    assert_eq!(matched.matched.user_b_id, uid("ravi"));
    assert_eq!(harness.store.match_count(), 1);

    // Asha: one match notification about Ravi
    let asha = harness.store.notifications_for(&uid("asha"));
    assert_eq!(asha.len(), 1);
    assert_eq!(asha[0].kind, NotificationKind::Match);
    assert_eq!(asha[0].source_id, matched.matched.id);
    assert_eq!(asha[0].payload.other.user_id, uid("ravi"));

    // Ravi: the earlier like notification plus one match notification about Asha
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Like), 1);
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
    let ravi_match = harness
        .store
        .notifications_for(&uid("ravi"))
        .into_iter()
        .find(|n| n.kind == NotificationKind::Match)
        .unwrap();
    assert_eq!(ravi_match.payload.other.user_id, uid("asha"));
}

#[tokio::test]
async fn test_self_like_rejected_without_writes() {
    let harness = Harness::with_users(&["asha"]);
    let err = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("asha"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_domain(),
        Some(DomainError::InvalidSelfAction(_))
    ));
    assert_eq!(err.status_code(), 400);
    assert_eq!(harness.store.like_count(), 0);
    assert!(harness.store.notifications_for(&uid("asha")).is_empty());
}

#[tokio::test]
async fn test_like_unknown_profile_is_not_found() {
    let harness = Harness::with_users(&["asha"]);
    let err = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::ProfileNotFound(_))));
    assert_eq!(err.status_code(), 404);
    assert_eq!(harness.store.like_count(), 0);
}

#[tokio::test]
async fn test_repeated_like_is_idempotent() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    let first = pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    let second = pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();

    assert_eq!(second.status, LikeStatus::AlreadyLiked);
    assert_eq!(second.like.id, first.like.id);
    assert_eq!(harness.store.like_count(), 1);
    assert_eq!(harness.store.notifications_for(&uid("ravi")).len(), 1);
}

#[tokio::test]
async fn test_liking_after_match_adds_nothing() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();
    let again = pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();

    assert_eq!(again.status, LikeStatus::AlreadyLiked);
    assert!(!again.matched.as_ref().unwrap().created);
    assert_eq!(harness.store.match_count(), 1);
    assert_eq!(count_kind(&harness, "asha", NotificationKind::Match), 1);
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutual_likes_match_once() {
    for _ in 0..25 {
        let harness = Harness::with_users(&["asha", "ravi"]);
        harness
            .store
            .faults()
            .set_write_delay(Some(Duration::from_millis(1)));
        let ctx = Arc::new(harness.ctx.clone());

        let forward = tokio::spawn(like_task(ctx.clone(), "asha", "ravi"));
        let backward = tokio::spawn(like_task(ctx.clone(), "ravi", "asha"));
        let (forward, backward) = (forward.await.unwrap(), backward.await.unwrap());

        assert!(forward.is_mutual() || backward.is_mutual());
        assert_eq!(harness.store.match_count(), 1);
        assert_eq!(count_kind(&harness, "asha", NotificationKind::Match), 1);
        assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
    }
}

async fn like_task(ctx: Arc<ServiceContext>, liker: &'static str, liked: &'static str) -> vivah_service::LikeOutcome {
    LikePipeline::new(&ctx)
        .like(&uid(liker), &uid(liked))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_match_creation_race_keeps_one_record() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let ctx = Arc::new(harness.ctx.clone());
    let mut tasks = JoinSet::new();

    for i in 0..8 {
        let ctx = ctx.clone();
        tasks.spawn(async move {
            let (a, b) = if i % 2 == 0 { ("asha", "ravi") } else { ("ravi", "asha") };
            MatchService::new(&ctx)
                .create_match_if_absent(&uid(a), &uid(b))
                .await
                .unwrap()
        });
    }

    let mut created = 0;
    let mut ids = Vec::new();
    while let Some(result) = tasks.join_next().await {
        let result = result.unwrap();
        if result.created {
            created += 1;
        }
        ids.push(result.matched.id);
    }

    assert_eq!(created, 1);
    assert_eq!(harness.store.match_count(), 1);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_notification_failure_does_not_undo_like() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    harness.store.faults().make_unreachable(uid("ravi"));

    let outcome = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("ravi"))
        .await
        .unwrap();

    assert_eq!(outcome.status, LikeStatus::Recorded);
    assert_eq!(outcome.notification_failures.len(), 1);
    assert!(matches!(
        outcome.notification_failures[0],
        DomainError::NotificationDeliveryFailed { .. }
    ));
    assert_eq!(harness.store.like_count(), 1);
    assert!(harness.store.notifications_for(&uid("ravi")).is_empty());
    // One initial try plus two retries
    assert_eq!(harness.store.notification_write_attempts(), 3);
}

#[tokio::test]
async fn test_transient_notification_failure_is_retried() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    harness.store.faults().fail_notification_writes(2);

    let outcome = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("ravi"))
        .await
        .unwrap();

    assert!(outcome.notification_failures.is_empty());
    assert_eq!(harness.store.notifications_for(&uid("ravi")).len(), 1);
    assert_eq!(harness.store.notification_write_attempts(), 3);
}

#[tokio::test]
async fn test_one_failed_match_notification_leaves_the_other() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    harness.store.faults().make_unreachable(uid("asha"));
    let outcome = pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();

    assert!(outcome.is_mutual());
    assert_eq!(outcome.notification_failures.len(), 1);
    assert_eq!(harness.store.match_count(), 1);
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
    assert_eq!(count_kind(&harness, "asha", NotificationKind::Match), 0);

    // Liking again repairs the missing side without duplicating the other
    harness.store.faults().make_reachable(&uid("asha"));
    let retry = pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();
    assert!(retry.notification_failures.is_empty());
    assert_eq!(count_kind(&harness, "asha", NotificationKind::Match), 1);
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
}

#[tokio::test]
async fn test_match_write_failure_fails_the_like_call() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    harness.store.faults().fail_match_writes(1);
    let err = pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.status_code(), 503);
    assert_eq!(harness.store.match_count(), 0);
    // The like itself committed before the match write
    assert_eq!(harness.store.like_count(), 2);

    let report = pipeline.reconcile_pair(&uid("asha"), &uid("ravi")).await.unwrap();
    assert_eq!(report.state, PairState::Mutual);
    assert!(report.matched.as_ref().unwrap().created);
    assert_eq!(report.notifications_created, 2);
    assert_eq!(harness.store.match_count(), 1);
}

#[tokio::test]
async fn test_repeat_like_completes_match_after_failed_write() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    harness.store.faults().fail_match_writes(1);
    pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap_err();
    assert_eq!(harness.store.match_count(), 0);

    let outcome = pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();

    assert_eq!(outcome.status, LikeStatus::AlreadyLiked);
    assert!(outcome.matched.as_ref().unwrap().created);
    assert_eq!(outcome.acknowledgement(), Acknowledgement::Matched);
    assert!(outcome.notification_failures.is_empty());
    assert_eq!(harness.store.match_count(), 1);
    assert_eq!(harness.store.match_write_attempts(), 2);
    assert_eq!(harness.store.like_count(), 2);

    assert_eq!(count_kind(&harness, "asha", NotificationKind::Match), 1);
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Match), 1);
    let asha_match = harness
        .store
        .notifications_for(&uid("asha"))
        .into_iter()
        .find(|n| n.kind == NotificationKind::Match)
        .unwrap();
    assert_eq!(asha_match.payload.other.user_id, uid("ravi"));
}

#[tokio::test]
async fn test_store_outage_surfaces_as_unavailable() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    harness.store.faults().set_unavailable(true);

    let err = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("ravi"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::StoreUnavailable(_))));
    harness.store.faults().set_unavailable(false);
    assert_eq!(harness.store.like_count(), 0);
}

#[tokio::test]
async fn test_display_lookup_failure_falls_back_to_bare_payload() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    harness.store.faults().fail_display_lookups(true);

    let outcome = LikePipeline::new(&harness.ctx)
        .like(&uid("asha"), &uid("ravi"))
        .await
        .unwrap();

    assert!(outcome.notification_failures.is_empty());
    let inbox = harness.store.notifications_for(&uid("ravi"));
    assert_eq!(inbox[0].payload.other.user_id, uid("asha"));
    assert!(inbox[0].payload.other.name.is_none());
}

#[tokio::test]
async fn test_reconcile_healthy_pair_changes_nothing() {
    let harness = Harness::with_users(&["asha", "ravi", "kiran"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    pipeline.like(&uid("ravi"), &uid("asha")).await.unwrap();
    pipeline.like(&uid("kiran"), &uid("asha")).await.unwrap();

    let mutual = pipeline.reconcile_pair(&uid("ravi"), &uid("asha")).await.unwrap();
    assert_eq!(mutual.notifications_created, 0);
    assert!(!mutual.matched.unwrap().created);

    let one_sided = pipeline.reconcile_pair(&uid("asha"), &uid("kiran")).await.unwrap();
    assert_eq!(
        one_sided.state,
        PairState::OneSided {
            liker: uid("kiran"),
            liked: uid("asha"),
        }
    );
    assert_eq!(one_sided.notifications_created, 0);

    let none = pipeline.reconcile_pair(&uid("ravi"), &uid("kiran")).await.unwrap();
    assert_eq!(none.state, PairState::NoLike);
    assert!(none.matched.is_none());
}

#[tokio::test]
async fn test_reconcile_redelivers_missing_like_notification() {
    let harness = Harness::with_users(&["asha", "ravi"]);
    let pipeline = LikePipeline::new(&harness.ctx);

    harness.store.faults().make_unreachable(uid("ravi"));
    pipeline.like(&uid("asha"), &uid("ravi")).await.unwrap();
    harness.store.faults().make_reachable(&uid("ravi"));

    let report = pipeline.reconcile_pair(&uid("asha"), &uid("ravi")).await.unwrap();
    assert_eq!(report.notifications_created, 1);
    assert!(report.notification_failures.is_empty());
    assert_eq!(count_kind(&harness, "ravi", NotificationKind::Like), 1);
}

#[tokio::test]
async fn test_reconcile_rejects_same_user() {
    let harness = Harness::with_users(&["asha"]);
    let err = LikePipeline::new(&harness.ctx)
        .reconcile_pair(&uid("asha"), &uid("asha"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
