//! Like handlers
//!
//! Liking a profile and listing likes.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use vivah_service::dto::{ApiResponse, LikeEntryResponse, LikeResponse, ListQuery};
use vivah_service::{LikePipeline, LikeService, LikeStatus};

use crate::extractors::{AuthUser, UserIdPath, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Like a profile
///
/// POST /profiles/{user_id}/likes
///
/// 201 when the like is new, 200 when it already existed. The body says
/// whether the like completed a match.
pub async fn like_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Response> {
    let target = path.user_id()?;

    let outcome = LikePipeline::new(state.service_context())
        .like(&auth.user_id, &target)
        .await?;

    let body = Json(ApiResponse::new(LikeResponse::from(&outcome)));
    if outcome.status == LikeStatus::Recorded {
        Ok(Created(body).into_response())
    } else {
        Ok(body.into_response())
    }
}

/// Likes the caller has received, newest first
///
/// GET /users/@me/likes/received
pub async fn received_likes(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<LikeEntryResponse>>>> {
    let likes = LikeService::new(state.service_context())
        .received(&auth.user_id, query.limit())
        .await?;
    Ok(Json(ApiResponse::new(
        likes.into_iter().map(LikeEntryResponse::from).collect(),
    )))
}

/// Likes the caller has sent, newest first
///
/// GET /users/@me/likes/sent
pub async fn sent_likes(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<LikeEntryResponse>>>> {
    let likes = LikeService::new(state.service_context())
        .sent(&auth.user_id, query.limit())
        .await?;
    Ok(Json(ApiResponse::new(
        likes.into_iter().map(LikeEntryResponse::from).collect(),
    )))
}
