//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, likes, matches, notifications, profiles};
use crate::state::AppState;

/// Create the main API router (health routes are separate to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(current_user_routes())
}

/// Routes addressed at another user's profile
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/:user_id", get(profiles::get_profile))
        .route("/profiles/:user_id/likes", post(likes::like_profile))
        .route("/profiles/:user_id/pair-state", get(profiles::get_pair_state))
        .route("/profiles/:user_id/reconcile", post(profiles::reconcile_pair))
}

/// Routes over the caller's own data
fn current_user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/matches", get(matches::list_matches))
        .route("/users/@me/likes/received", get(likes::received_likes))
        .route("/users/@me/likes/sent", get(likes::sent_likes))
        .route("/users/@me/notifications", get(notifications::list_notifications))
        .route(
            "/users/@me/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/users/@me/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/users/@me/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
