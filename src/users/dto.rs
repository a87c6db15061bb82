use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::users::error::UserError;
use crate::users::repo_types::UserStatus;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_username(username: &str) -> Result<(), UserError> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(UserError::Validation(
            "username must be 3-32 characters".into(),
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), UserError> {
    let len = email.chars().count();
    if !(5..=128).contains(&len) || !is_valid_email(email) {
        return Err(UserError::Validation("invalid email address".into()));
    }
    Ok(())
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        check_username(&self.username)?;
        check_email(&self.email)?;
        let len = self.password.chars().count();
        if !(6..=64).contains(&len) {
            return Err(UserError::Validation(
                "password must be 6-64 characters".into(),
            ));
        }
        Ok(())
    }
}

/// Request body for a partial update. Absent fields are left unchanged;
/// a supplied field must pass the same checks as on create.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        if let Some(username) = &self.username {
            check_username(username)?;
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        Ok(())
    }
}
