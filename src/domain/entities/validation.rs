use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "validation_status")]
pub enum ValidationStatus {
    Pending,
    Validated,
    Rejected,
}

impl ValidationStatus {
    /// Whether a reviewer may set this status. `Pending` is only ever the initial state.
    pub fn is_decision(&self) -> bool {
        matches!(self, ValidationStatus::Validated | ValidationStatus::Rejected)
    }
}

impl FromStr for ValidationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ValidationStatus::Pending),
            "Validated" => Ok(ValidationStatus::Validated),
            "Rejected" => Ok(ValidationStatus::Rejected),
            _ => Err(AppError::BadRequest("Invalid status".to_string())),
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Pending => "Pending",
            ValidationStatus::Validated => "Validated",
            ValidationStatus::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Validation {
    pub id: i64,
    pub status: ValidationStatus,
    pub feedback: Option<String>,
    pub skill_id: i64,
    pub faculty_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    /// Parses the requested status, accepting only reviewer decisions.
    pub fn decision(&self) -> Result<ValidationStatus, AppError> {
        let status = self.status
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?
            .parse::<ValidationStatus>()?;

        if status.is_decision() {
            Ok(status)
        } else {
            Err(AppError::BadRequest("Invalid status".to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: Option<String>,
}

impl FeedbackRequest {
    pub fn into_text(self) -> String {
        self.feedback.unwrap_or_default()
    }
}
