use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{user::non_blank, validation::ValidationStatus};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub student_id: i64,
    pub skill_name: String,
    pub level: String,
    pub evidence: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillInsert {
    pub student_id: i64,
    pub skill_name: String,
    pub level: String,
    pub evidence: Option<String>,
}

/// Text fields of a skill submission; the evidence file travels separately.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewSkill {
    #[validate(
        required(message = "Missing skill name in form"),
        length(min = 1, max = 100, message = "Skill name must be 1-100 characters"),
        custom(function = "non_blank")
    )]
    pub skill_name: Option<String>,

    #[validate(
        required(message = "Missing level in form"),
        length(min = 1, max = 50, message = "Level must be 1-50 characters"),
        custom(function = "non_blank")
    )]
    pub level: Option<String>,
}

impl NewSkill {
    pub fn prepare_for_insert(self, student_id: i64, evidence: Option<String>) -> SkillInsert {
        SkillInsert {
            student_id,
            skill_name: self.skill_name.unwrap_or_default().trim().to_string(),
            level: self.level.unwrap_or_default().trim().to_string(),
            evidence,
        }
    }
}

/// A skill joined with the status and feedback of its validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SkillWithStatus {
    pub id: i64,
    pub student_id: i64,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    pub level: String,
    pub evidence: Option<String>,
    pub status: ValidationStatus,
    pub feedback: Option<String>,
}

/// Faculty view of a skill: the student view plus who submitted it and the
/// validation id used for review actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    pub level: String,
    pub evidence: Option<String>,
    pub status: ValidationStatus,
    pub feedback: Option<String>,
    #[serde(rename = "studentName")]
    pub student_name: String,
    #[serde(rename = "studentEmail")]
    pub student_email: String,
    pub validation_id: i64,
}
