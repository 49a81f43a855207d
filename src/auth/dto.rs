use serde::{Deserialize, Serialize};

use crate::users::repo_types::{User, UserInput};

const MIN_PASSWORD_CHARS: usize = 6;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub account: String,
    pub password: String,
    pub university: String,
    pub full_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        required("account", &self.account)?;
        secret_present(&self.password)?;
        required("university", &self.university)?;
        required("fullName", &self.full_name)?;
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            ));
        }
        Ok(())
    }

    pub fn into_input(self) -> UserInput {
        UserInput {
            account: self.account,
            password: self.password,
            name: self.full_name,
            university: self.university,
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        required("account", &self.account)?;
        secret_present(&self.password)
    }
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Passwords are taken verbatim; only the empty string counts as missing.
fn secret_present(password: &str) -> Result<(), String> {
    if password.is_empty() {
        Err("password is required".into())
    } else {
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            account: "alice01".into(),
            password: password.into(),
            university: "MIT".into(),
            full_name: "Alice A".into(),
        }
    }

    #[test]
    fn register_body_uses_client_field_names() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"account":"alice01","password":"secret1","university":"MIT","fullName":"Alice A"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        let input = req.into_input();
        assert_eq!(input.name, "Alice A");
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(register("12345").validate().is_err());
        assert!(register("123456").validate().is_ok());
        // counted in characters, not bytes
        assert!(register("密码密码密").validate().is_err());
    }

    #[test]
    fn whitespace_passwords_are_kept_verbatim() {
        assert!(register("      ").validate().is_ok());
        assert!(register("     ").validate().is_err());
        let login = LoginRequest {
            account: "alice01".into(),
            password: "   ".into(),
        };
        assert!(login.validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut req = register("secret1");
        req.full_name = " ".into();
        assert_eq!(req.validate().unwrap_err(), "fullName is required");

        let login = LoginRequest {
            account: "alice01".into(),
            password: String::new(),
        };
        assert_eq!(login.validate().unwrap_err(), "password is required");
    }
}
