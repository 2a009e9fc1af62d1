use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use std::{borrow::Cow, fmt};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Faculty,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Student => write!(f, "Student"),
            UserRole::Faculty => write!(f, "Faculty"),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub department_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub department_id: Option<i64>,
}

/// Public view of an account; `department` carries the department name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Name is required (max 100 characters)"),
        custom(function = "non_blank")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(required(message = "Role is required"))]
    pub role: Option<UserRole>,

    #[serde(default)]
    pub department_id: Option<i64>,
}

/// Rejects text that is empty once surrounding whitespace is trimmed.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("Must not be blank"));
        return Err(err);
    }
    Ok(())
}

impl NewUser {
    pub fn prepare_for_insert(&self, role: UserRole, password_hash: String) -> UserInsert {
        UserInsert {
            name: self.name.trim().to_string(),
            email: self.email.clone(),
            password_hash,
            role,
            department_id: self.department_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,

    #[validate(required(message = "Role is required"))]
    pub role: Option<UserRole>,
}
