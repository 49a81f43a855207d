use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{NewUser, User};

const ACCOUNT_INDEX: &str = "users_account_active_idx";
const PHONE_INDEX: &str = "users_phone_active_idx";

const USER_COLUMNS: &str = r#"
    id, name, phone, account, password, avatar, birthdate, gender, university,
    major, photos, interests, is_verified, is_vip, created_at, updated_at, deleted_at
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account already taken")]
    AccountTaken,
    #[error("phone number already taken")]
    PhoneTaken,
    #[error("no live row for user")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for user records. Lookups return `Ok(None)` for a missing
/// user; `Err` is reserved for store failures. Soft-deleted rows are invisible.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn find_by_account(&self, account: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Overwrites every mutable column of the row identified by `user.id`;
    /// `NotFound` when no live row matches.
    async fn update(&self, user: &User) -> Result<(), StoreError>;
    async fn account_exists(&self, account: &str) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(ACCOUNT_INDEX) => return StoreError::AccountTaken,
                Some(PHONE_INDEX) => return StoreError::PhoneTaken,
                _ => {}
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (account, password, name, university)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.account)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.university)
            .fetch_one(&self.db)
            .await
            .map_err(classify)?;
        debug!(user_id = %created.id, "user row inserted");
        Ok(created)
    }

    async fn find_by_account(&self, account: &str) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE account = $1 AND deleted_at IS NULL"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(account)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET name = $2, phone = $3, account = $4, password = $5, avatar = $6,
                   birthdate = $7, gender = $8, university = $9, major = $10,
                   photos = $11, interests = $12, is_verified = $13, is_vip = $14,
                   updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.account)
        .bind(&user.password)
        .bind(&user.avatar)
        .bind(user.birthdate)
        .bind(&user.gender)
        .bind(&user.university)
        .bind(&user.major)
        .bind(&user.photos)
        .bind(&user.interests)
        .bind(user.is_verified)
        .bind(user.is_vip)
        .execute(&self.db)
        .await
        .map_err(classify)?;
        if result.rows_affected() == 0 {
            debug!(user_id = %user.id, "no live row to update");
            return Err(StoreError::NotFound);
        }
        debug!(user_id = %user.id, "user row updated");
        Ok(())
    }

    async fn account_exists(&self, account: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE account = $1 AND deleted_at IS NULL)"#,
        )
        .bind(account)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }
}
