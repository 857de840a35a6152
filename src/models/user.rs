//! User models.

use serde::{Deserialize, Serialize};

use crate::http::validation::{FieldError, Validate, Violations};

/// Longest accepted `user_type` query value, in characters.
pub const USER_TYPE_MAX_LENGTH: usize = 50;

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Inbound user, carrying a password that must never be echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserIn {
    pub email: String,
    pub password: String,
}

impl From<UserIn> for User {
    fn from(user: UserIn) -> Self {
        User { email: user.email }
    }
}

impl Validate for UserIn {}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Validate for UserDetails {}

/// Optional query accepted by `POST /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserTypeQuery {
    pub user_type: Option<String>,
}

impl Validate for UserTypeQuery {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        if let Some(user_type) = &self.user_type {
            violations.check(user_type.chars().count() <= USER_TYPE_MAX_LENGTH, || {
                FieldError::new(
                    ["query", "user_type"],
                    format!("String should have at most {USER_TYPE_MAX_LENGTH} characters"),
                    "string_too_long",
                )
            });
        }
        violations.into_result()
    }
}

/// Embedded body `{"email": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailBody {
    pub email: String,
}

impl Validate for EmailBody {}
