use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest},
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(|msg| {
        warn!(%msg, "invalid register body");
        ApiError::BadRequest(msg)
    })?;

    let session = state
        .auth
        .register(payload.into_input())
        .await
        .map_err(|e| ApiError::from_auth(e, "注册失败"))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: session.token,
            user: session.user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let session = state
        .auth
        .login(&payload.account, &payload.password)
        .await
        .map_err(|e| ApiError::from_auth(e, "登录失败"))?;

    Ok(Json(AuthResponse {
        token: session.token,
        user: session.user,
    }))
}

/// Tokens are stateless, so there is nothing to revoke; the client drops its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "登出成功",
    })
}
