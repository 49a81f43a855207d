use crate::users::repo::StoreError;

/// Failures of the authentication and profile flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("account already exists")]
    AccountExists,
    #[error("invalid account or password")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("phone number already in use")]
    PhoneTaken,
    #[error("invalid token")]
    InvalidToken,
    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountTaken => AuthError::AccountExists,
            StoreError::PhoneTaken => AuthError::PhoneTaken,
            StoreError::NotFound => AuthError::UserNotFound,
            StoreError::Database(e) => AuthError::Store(e),
        }
    }
}
