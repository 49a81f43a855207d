use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub account: String,
    /// Argon2 hash while stored; cleared before a user leaves the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub avatar: String,
    #[serde(serialize_with = "birthdate_format::serialize")]
    pub birthdate: Option<time::Date>,
    pub gender: String,
    pub university: String,
    pub major: String,
    pub photos: Vec<String>,
    pub interests: Vec<String>,
    pub is_verified: bool,
    #[serde(rename = "isVIP")]
    pub is_vip: bool,
    #[serde(serialize_with = "time::serde::rfc3339::serialize")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "time::serde::rfc3339::serialize")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing)]
    pub deleted_at: Option<OffsetDateTime>,
}

impl User {
    pub fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }
}

/// Registration candidate as submitted by the client.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub account: String,
    pub password: String,
    pub name: String,
    pub university: String,
}

/// Row to insert; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub account: String,
    pub password_hash: String,
    pub name: String,
    pub university: String,
}

/// Dates travel as `YYYY-MM-DD`; an empty string reads as no date.
pub(crate) mod birthdate_format {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::{macros::format_description, Date};

    pub fn serialize<S: Serializer>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => {
                let text = date
                    .format(format_description!("[year]-[month]-[day]"))
                    .map_err(ser::Error::custom)?;
                s.serialize_str(&text)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Date::parse(text, format_description!("[year]-[month]-[day]"))
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}
