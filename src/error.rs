use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::auth::errors::AuthError;

/// Error rendered at the HTTP boundary as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(&'static str),
    NotFound(&'static str),
    Conflict(&'static str),
    Internal(&'static str),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) => m.as_str(),
            ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Internal(m) => *m,
        }
    }

    /// Maps a service failure; `fallback` is the message shown for failures
    /// the client cannot act on.
    pub fn from_auth(err: AuthError, fallback: &'static str) -> Self {
        match err {
            AuthError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AuthError::AccountExists => ApiError::Conflict("账号已存在"),
            AuthError::InvalidCredentials => ApiError::Unauthorized("账号或密码错误"),
            AuthError::UserNotFound => ApiError::NotFound("用户不存在"),
            AuthError::PhoneTaken => ApiError::Conflict("手机号已被使用"),
            AuthError::InvalidToken => ApiError::Unauthorized("无效的令牌"),
            AuthError::Store(_) | AuthError::Internal(_) => {
                error!(error = %err, "{fallback}");
                ApiError::Internal(fallback)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_and_message() {
        let cases = [
            (AuthError::AccountExists, StatusCode::CONFLICT, "账号已存在"),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED, "账号或密码错误"),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND, "用户不存在"),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED, "无效的令牌"),
            (
                AuthError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "注册失败",
            ),
            (
                AuthError::Store(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
                "注册失败",
            ),
        ];
        for (err, status, message) in cases {
            let api = ApiError::from_auth(err, "注册失败");
            assert_eq!(api.status(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn invalid_input_keeps_its_message() {
        let api = ApiError::from_auth(AuthError::InvalidInput("account is required".into()), "x");
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "account is required");
    }
}
