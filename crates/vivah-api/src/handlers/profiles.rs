//! Profile handlers
//!
//! Gated profile reads and pair state.

use axum::{
    extract::{Path, State},
    Json,
};
use vivah_core::{PairState, RedactedProfile};
use vivah_service::dto::{ApiResponse, ListQuery, ReconcileResponse};
use vivah_service::{AccessService, LikePipeline, MatchService};

use crate::extractors::{AuthUser, UserIdPath, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Profile as the caller's plan allows
///
/// GET /profiles/{user_id}
///
/// `limit` bounds the match list, which only appears on the caller's own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<ApiResponse<RedactedProfile>>> {
    let target = path.user_id()?;
    let profile = AccessService::new(state.service_context())
        .view_profile(&auth.user_id, &target, query.limit())
        .await?;
    Ok(Json(ApiResponse::new(profile)))
}

/// Like state between the caller and another user
///
/// GET /profiles/{user_id}/pair-state
pub async fn get_pair_state(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ApiResponse<PairState>>> {
    let other = path.user_id()?;
    let pair_state = MatchService::new(state.service_context())
        .pair_state(&auth.user_id, &other)
        .await?;
    Ok(Json(ApiResponse::new(pair_state)))
}

/// Repair a missing match or notification between the caller and another user
///
/// POST /profiles/{user_id}/reconcile
pub async fn reconcile_pair(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ApiResponse<ReconcileResponse>>> {
    let other = path.user_id()?;
    let report = LikePipeline::new(state.service_context())
        .reconcile_pair(&auth.user_id, &other)
        .await?;
    Ok(Json(ApiResponse::new(ReconcileResponse::from(&report))))
}
