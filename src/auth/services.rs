use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    errors::AuthError,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};
use crate::users::{
    repo::UserStore,
    repo_types::{NewUser, User, UserInput},
};

/// Token plus the (password-free) user it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Registration, login and profile operations over an injected user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    pub async fn register(&self, candidate: UserInput) -> Result<AuthSession, AuthError> {
        if candidate.account.trim().is_empty() {
            return Err(AuthError::InvalidInput("account is required".into()));
        }
        if self.users.account_exists(&candidate.account).await? {
            warn!(account = %candidate.account, "account already registered");
            return Err(AuthError::AccountExists);
        }

        let password_hash = hash_password(&candidate.password)?;
        // A concurrent registration can still win the race; the store's
        // unique index turns that into AccountExists as well.
        let user = self
            .users
            .create(&NewUser {
                account: candidate.account,
                password_hash,
                name: candidate.name,
                university: candidate.university,
            })
            .await?;

        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, account = %user.account, "user registered");
        Ok(AuthSession {
            token,
            user: user.without_password(),
        })
    }

    /// Unknown account and wrong password fail identically.
    pub async fn login(&self, account: &str, password: &str) -> Result<AuthSession, AuthError> {
        let Some(user) = self.users.find_by_account(account).await? else {
            warn!(account = %account, "login unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password) {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.keys.sign(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(AuthSession {
            token,
            user: user.without_password(),
        })
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await?
            .map(User::without_password)
            .ok_or(AuthError::UserNotFound)
    }

    /// Persists `user` over the stored record with the same id. Account,
    /// password and the verification/VIP flags always keep their stored values.
    pub async fn update_user_profile(&self, mut user: User) -> Result<(), AuthError> {
        let existing = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.account = existing.account;
        user.password = existing.password;
        user.is_verified = existing.is_verified;
        user.is_vip = existing.is_vip;
        user.created_at = existing.created_at;

        self.users.update(&user).await?;
        debug!(user_id = %user.id, "profile updated");
        Ok(())
    }
}
