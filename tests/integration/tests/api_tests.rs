//! API Integration Tests
//!
//! Each test starts the full application over an in-memory store, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, mint_claims, TestServer, TEST_SECRET,
};
use reqwest::StatusCode;
use serde_json::Value;
use vivah_common::Claims;
use vivah_core::UserId;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_as("/api/v1/users/@me/notifications", "asha").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_rejected() {
    let server = TestServer::with_users(&["ravi"]).await.unwrap();
    let response = server.get("/api/v1/profiles/ravi").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_forged_and_expired_tokens_rejected() {
    let server = TestServer::with_users(&["ravi"]).await.unwrap();
    let url = format!("{}/api/v1/profiles/ravi", server.base_url());

    let forged = mint_token("asha", "some-other-secret");
    let response = server.client.get(&url).bearer_auth(forged).send().await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");

    let expired = mint_claims(&Claims::for_user(&UserId::new("asha"), -3600), TEST_SECRET);
    let response = server.client.get(&url).bearer_auth(expired).send().await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "TOKEN_EXPIRED");
}

// ============================================================================
// Like → Match Tests
// ============================================================================

#[tokio::test]
async fn test_like_then_like_back_matches() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();

    let response = server.like("asha", "ravi").await.unwrap();
    let first: Envelope<LikeBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.data.liker_id, "asha");
    assert_eq!(first.data.liked_id, "ravi");
    assert_eq!(first.data.status, "recorded");
    assert_eq!(first.data.acknowledgement, "like_sent");
    assert!(first.data.matched.is_none());

    let response = server.like("ravi", "asha").await.unwrap();
    let second: Envelope<LikeBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(second.data.acknowledgement, "matched");
    assert!(!second.data.notifications_pending);
    let matched = second.data.matched.unwrap();
    assert!(matched.created);
    assert_eq!(matched.user_a_id, "asha");
    assert_eq!(matched.user_b_id, "ravi");

    let response = server
        .get_as("/api/v1/profiles/asha/pair-state", "ravi")
        .await
        .unwrap();
    let state: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.data["state"], "mutual");

    // Asha's inbox: one match notification about Ravi
    let response = server
        .get_as("/api/v1/users/@me/notifications", "asha")
        .await
        .unwrap();
    let inbox: Envelope<Vec<NotificationBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(inbox.data.len(), 1);
    assert_eq!(inbox.data[0].kind, "match");
    assert_eq!(inbox.data[0].source_id, matched.id);
    assert_eq!(inbox.data[0].other.user_id, "ravi");
    assert_eq!(inbox.data[0].other.name.as_deref(), Some("Ravi"));
}

#[tokio::test]
async fn test_repeat_like_returns_ok_not_created() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();

    let response = server.like("asha", "ravi").await.unwrap();
    let first: Envelope<LikeBody> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.like("asha", "ravi").await.unwrap();
    let again: Envelope<LikeBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(again.data.status, "already_liked");
    assert_eq!(again.data.like_id, first.data.like_id);
    assert_eq!(server.store.like_count(), 1);
}

#[tokio::test]
async fn test_self_like_is_bad_request() {
    let server = TestServer::with_users(&["asha"]).await.unwrap();
    let response = server.like("asha", "asha").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_SELF_ACTION");
    assert!(!body.error.retryable);
}

#[tokio::test]
async fn test_like_unknown_profile_is_not_found() {
    let server = TestServer::with_users(&["asha"]).await.unwrap();
    let response = server.like("asha", "nobody").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_PROFILE");
}

#[tokio::test]
async fn test_store_outage_is_retryable_503() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();
    server.store.faults().set_unavailable(true);

    let response = server.like("asha", "ravi").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body.error.code, "STORE_UNAVAILABLE");
    assert!(body.error.retryable);
}

#[tokio::test]
async fn test_undelivered_notification_reported_and_reconciled() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();
    server.store.faults().make_unreachable(UserId::new("ravi"));

    let response = server.like("asha", "ravi").await.unwrap();
    let like: Envelope<LikeBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(like.data.notifications_pending);

    server.store.faults().make_reachable(&UserId::new("ravi"));
    let response = server
        .post_as("/api/v1/profiles/ravi/reconcile", "asha")
        .await
        .unwrap();
    let report: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.data["state"]["state"], "one_sided");
    assert_eq!(report.data["notifications_created"], 1);

    let response = server
        .get_as("/api/v1/users/@me/notifications/unread-count", "ravi")
        .await
        .unwrap();
    let count: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data["unread"], 1);
}

#[tokio::test]
async fn test_like_listings() {
    let server = TestServer::with_users(&["asha", "ravi", "kiran"]).await.unwrap();
    server.like("asha", "ravi").await.unwrap();
    server.like("kiran", "ravi").await.unwrap();

    let response = server
        .get_as("/api/v1/users/@me/likes/received", "ravi")
        .await
        .unwrap();
    let received: Envelope<Vec<Value>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(received.data.len(), 2);

    let response = server
        .get_as("/api/v1/users/@me/likes/sent?limit=1", "asha")
        .await
        .unwrap();
    let sent: Envelope<Vec<Value>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent.data.len(), 1);
    assert_eq!(sent.data[0]["liked_id"], "ravi");
}

#[tokio::test]
async fn test_limit_out_of_range_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .get_as("/api/v1/users/@me/likes/received?limit=500", "asha")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Access Gate Tests
// ============================================================================

#[tokio::test]
async fn test_free_viewer_gets_masked_contact() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();

    let response = server.get_as("/api/v1/profiles/ravi", "asha").await.unwrap();
    let view: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(view.data["basics"]["name"], "Ravi");
    assert_eq!(view.data["contact"]["masked"], true);
    assert_eq!(view.data["contact"]["phone"], "91******89");
    assert_ne!(view.data["contact"]["email"], "ravi@mail.in");
}

#[tokio::test]
async fn test_premium_viewer_gets_full_contact() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();
    server.premium("asha");

    let response = server.get_as("/api/v1/profiles/ravi", "asha").await.unwrap();
    let view: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(view.data["contact"]["masked"], false);
    assert_eq!(view.data["contact"]["phone"], "9123456789");
    assert_eq!(view.data["contact"]["email"], "ravi@mail.in");
}

#[tokio::test]
async fn test_match_list_hidden_for_free_visible_for_premium() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();
    server.like("asha", "ravi").await.unwrap();
    server.like("ravi", "asha").await.unwrap();

    let response = server.get_as("/api/v1/users/@me/matches", "asha").await.unwrap();
    let free: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(free.data["visibility"], "hidden");
    assert_eq!(free.data["upsell"]["required_plan"], "premium");
    assert!(free.data.get("matches").is_none());

    server.premium("asha");
    let response = server.get_as("/api/v1/users/@me/matches", "asha").await.unwrap();
    let premium: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(premium.data["visibility"], "visible");
    assert_eq!(premium.data["matches"][0]["other"]["user_id"], "ravi");
}

// ============================================================================
// Notification Inbox Tests
// ============================================================================

#[tokio::test]
async fn test_mark_read_flow() {
    let server = TestServer::with_users(&["asha", "ravi", "kiran"]).await.unwrap();
    server.like("asha", "ravi").await.unwrap();
    server.like("kiran", "ravi").await.unwrap();

    let response = server
        .get_as("/api/v1/users/@me/notifications?unread_only=true", "ravi")
        .await
        .unwrap();
    let inbox: Envelope<Vec<NotificationBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(inbox.data.len(), 2);
    assert!(inbox.data.iter().all(|n| n.kind == "like" && !n.read));

    let first = &inbox.data[0].id;
    let response = server
        .post_as(&format!("/api/v1/users/@me/notifications/{first}/read"), "ravi")
        .await
        .unwrap();
    let read: Envelope<NotificationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(read.data.read);

    let response = server
        .post_as("/api/v1/users/@me/notifications/read-all", "ravi")
        .await
        .unwrap();
    let all: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.data["updated"], 1);

    let response = server
        .get_as("/api/v1/users/@me/notifications/unread-count", "ravi")
        .await
        .unwrap();
    let count: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data["unread"], 0);
}

#[tokio::test]
async fn test_cannot_read_another_users_notification() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();
    server.like("asha", "ravi").await.unwrap();

    let response = server
        .get_as("/api/v1/users/@me/notifications", "ravi")
        .await
        .unwrap();
    let inbox: Envelope<Vec<NotificationBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    let theirs = &inbox.data[0].id;

    let response = server
        .post_as(&format!("/api/v1/users/@me/notifications/{theirs}/read"), "asha")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_NOTIFICATION");

    let response = server
        .post_as("/api/v1/users/@me/notifications/not-a-number/read", "ravi")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_likes_over_http_match_once() {
    let server = TestServer::with_users(&["asha", "ravi"]).await.unwrap();

    let (forward, backward) = tokio::join!(server.like("asha", "ravi"), server.like("ravi", "asha"));
    assert_status(forward.unwrap(), StatusCode::CREATED).await.unwrap();
    assert_status(backward.unwrap(), StatusCode::CREATED).await.unwrap();

    assert_eq!(server.store.match_count(), 1);
    for user in ["asha", "ravi"] {
        let matches = server
            .store
            .notifications_for(&UserId::new(user))
            .into_iter()
            .filter(|n| n.kind == vivah_core::NotificationKind::Match)
            .count();
        assert_eq!(matches, 1, "{user} should have exactly one match notification");
    }
}
