use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

/// In-process `UserStore` used by tests. Enforces the same uniqueness rules as
/// the Postgres indexes.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Raw stored row, password included.
    pub fn stored(&self, id: Uuid) -> Option<User> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

fn live(user: &User) -> bool {
    user.deleted_at.is_none()
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|u| live(u) && u.account == user.account) {
            return Err(StoreError::AccountTaken);
        }
        let now = OffsetDateTime::now_utc();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            phone: None,
            account: user.account.clone(),
            password: user.password_hash.clone(),
            avatar: String::new(),
            birthdate: None,
            gender: String::new(),
            university: user.university.clone(),
            major: String::new(),
            photos: Vec::new(),
            interests: Vec::new(),
            is_verified: false,
            is_vip: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_account(&self, account: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|u| live(u) && u.account == account)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).filter(|u| live(u)).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let clash = |u: &User| live(u) && u.id != user.id;
        if rows.values().any(|u| clash(u) && u.account == user.account) {
            return Err(StoreError::AccountTaken);
        }
        if user.phone.is_some() && rows.values().any(|u| clash(u) && u.phone == user.phone) {
            return Err(StoreError::PhoneTaken);
        }
        let row = rows
            .get_mut(&user.id)
            .filter(|u| live(u))
            .ok_or(StoreError::NotFound)?;
        *row = User {
            created_at: row.created_at,
            deleted_at: row.deleted_at,
            updated_at: OffsetDateTime::now_utc(),
            ..user.clone()
        };
        Ok(())
    }

    async fn account_exists(&self, account: &str) -> Result<bool, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().any(|u| live(u) && u.account == account))
    }
}
