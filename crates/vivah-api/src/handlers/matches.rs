//! Match handlers

use axum::{extract::State, Json};
use vivah_core::MatchListView;
use vivah_service::dto::{ApiResponse, ListQuery};
use vivah_service::AccessService;

use crate::extractors::{AuthUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// The caller's matches, or an upsell prompt on the free plan
///
/// GET /users/@me/matches
pub async fn list_matches(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<Json<ApiResponse<MatchListView>>> {
    let view = AccessService::new(state.service_context())
        .list_matches(&auth.user_id, query.limit())
        .await?;
    Ok(Json(ApiResponse::new(view)))
}
