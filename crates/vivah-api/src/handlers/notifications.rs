//! Notification inbox handlers
//!
//! Every endpoint is scoped to the caller's own inbox.

use axum::{
    extract::{Path, State},
    Json,
};
use vivah_service::dto::{
    ApiResponse, MarkAllReadResponse, NotificationListQuery, NotificationResponse,
    UnreadCountResponse,
};
use vivah_service::NotificationService;

use crate::extractors::{AuthUser, NotificationIdPath, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<NotificationListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<NotificationResponse>>>> {
    let notifications = NotificationService::new(state.service_context())
        .list(&auth.user_id, query.unread_only, query.limit())
        .await?;
    Ok(Json(ApiResponse::new(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    )))
}

/// GET /users/@me/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UnreadCountResponse>>> {
    let unread = NotificationService::new(state.service_context())
        .unread_count(&auth.user_id)
        .await?;
    Ok(Json(ApiResponse::new(UnreadCountResponse { unread })))
}

/// POST /users/@me/notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<Json<ApiResponse<NotificationResponse>>> {
    let id = path.notification_id()?;
    let notification = NotificationService::new(state.service_context())
        .mark_read(&auth.user_id, id)
        .await?;
    Ok(Json(ApiResponse::new(NotificationResponse::from(notification))))
}

/// POST /users/@me/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<MarkAllReadResponse>>> {
    let updated = NotificationService::new(state.service_context())
        .mark_all_read(&auth.user_id)
        .await?;
    Ok(Json(ApiResponse::new(MarkAllReadResponse { updated })))
}
