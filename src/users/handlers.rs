use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::UpdateProfileRequest, repo_types::User};
use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    error::ApiError,
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/user/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state
        .auth
        .get_user_by_id(user_id)
        .await
        .map_err(|e| ApiError::from_auth(e, "获取用户信息失败"))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    state
        .auth
        .update_user_profile(payload.into_user(user_id))
        .await
        .map_err(|e| ApiError::from_auth(e, "更新用户信息失败"))?;

    Ok(Json(MessageResponse {
        message: "用户信息更新成功",
    }))
}
