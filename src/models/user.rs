// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// `password_hash` is never selected, so it cannot leak through a response.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// UI language code, "sv" unless chosen otherwise.
    pub language: String,

    pub is_verified: bool,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub current_subscription_id: Option<i64>,
}

pub(crate) fn default_language() -> String {
    "sv".to_string()
}

/// DTO for signing up a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Password hash must not be empty."))]
    pub password_hash: String,
    #[serde(default = "default_language")]
    #[validate(length(min = 2, max = 10))]
    pub language: String,
}

/// DTO for replacing every mutable column of a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Password hash must not be empty."))]
    pub password_hash: String,
    #[validate(length(min = 2, max = 10))]
    pub language: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub current_subscription_id: Option<i64>,
}

/// DTO for a partial user update. `None` (absent or `null`) leaves the column as is.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchUserRequest {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
}

impl PatchUserRequest {
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.is_verified.is_none() && self.language.is_none()
    }
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_defaults_to_swedish() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "username": "ada",
            "email": "ada@x.com",
            "password_hash": "h"
        }))
        .unwrap();

        assert_eq!(req.language, "sv");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_email_and_short_username() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "username": "yo",
            "email": "not-an-email",
            "password_hash": "h"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn null_patch_fields_count_as_absent() {
        let patch: PatchUserRequest = serde_json::from_value(json!({
            "is_active": null,
            "language": null
        }))
        .unwrap();
        assert!(patch.is_empty());

        let patch: PatchUserRequest = serde_json::from_value(json!({ "is_active": true })).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.is_active, Some(true));
        assert_eq!(patch.language, None);
    }
}
