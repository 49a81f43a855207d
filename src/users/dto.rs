use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{birthdate_format, User};

/// Body of `PUT /api/user/profile`: the client sends back the whole user
/// object. Identity, credential and bookkeeping fields are accepted but not
/// applied; unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default, with = "birthdate_format")]
    pub birthdate: Option<time::Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub major: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
}

/// The client echoes back what it was sent, nulls included; a null reads as
/// the empty value.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".into());
        }
        if self.university.trim().is_empty() {
            return Err("university is required".into());
        }
        Ok(())
    }

    /// Builds the candidate record for `user_id`. Fields the service owns
    /// (flags, timestamps) get placeholders that it replaces from storage.
    pub fn into_user(self, user_id: Uuid) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: user_id,
            name: self.name,
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            account: self.account,
            password: self.password,
            avatar: self.avatar,
            birthdate: self.birthdate,
            gender: self.gender,
            university: self.university,
            major: self.major,
            photos: self.photos,
            interests: self.interests,
            is_verified: false,
            is_vip: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
