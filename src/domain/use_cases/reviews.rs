use crate::{
    entities::{
        skill::Submission,
        validation::{FeedbackRequest, StatusUpdateRequest, Validation, ValidationStatus},
    },
    errors::AppError,
    repositories::{skill::SkillRepository, user::UserRepository, validation::ValidationRepository},
};

/// Faculty-side operations: the department-scoped submission list and the
/// two review actions on a validation.
pub struct ReviewHandler<U, S, V>
where
    U: UserRepository,
    S: SkillRepository,
    V: ValidationRepository,
{
    pub user_repo: U,
    pub skill_repo: S,
    pub validation_repo: V,
}

impl<U, S, V> ReviewHandler<U, S, V>
where
    U: UserRepository,
    S: SkillRepository,
    V: ValidationRepository,
{
    pub fn new(user_repo: U, skill_repo: S, validation_repo: V) -> Self {
        ReviewHandler {
            user_repo,
            skill_repo,
            validation_repo,
        }
    }

    /// Submissions from students in the faculty member's department. A
    /// faculty member without a department sees nothing.
    pub async fn list_submissions(&self, faculty_id: i64) -> Result<Vec<Submission>, AppError> {
        let faculty = self.user_repo.get_user_by_id(faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        match faculty.department_id {
            Some(department_id) => self.skill_repo.list_submissions_for_department(department_id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn update_status(
        &self,
        validation_id: i64,
        faculty_id: i64,
        request: StatusUpdateRequest,
    ) -> Result<Validation, AppError> {
        let current = self.find_validation(validation_id).await?;
        let decision = request.decision()?;

        if current.status != ValidationStatus::Pending {
            return Err(already_reviewed(current.status));
        }

        let updated = self.validation_repo
            .record_decision(validation_id, decision, faculty_id)
            .await?;

        match updated {
            Some(validation) => {
                tracing::info!(validation_id, faculty_id, status = %decision, "Validation decided");
                Ok(validation)
            }
            // Lost a race with another reviewer, or the skill was withdrawn meanwhile
            None => match self.validation_repo.get_validation(validation_id).await? {
                Some(latest) => Err(already_reviewed(latest.status)),
                None => Err(validation_not_found()),
            },
        }
    }

    /// Replaces the feedback text; allowed at any status and any number of times
    pub async fn update_feedback(
        &self,
        validation_id: i64,
        faculty_id: i64,
        request: FeedbackRequest,
    ) -> Result<Validation, AppError> {
        let feedback = request.into_text();

        let validation = self.validation_repo
            .update_feedback(validation_id, &feedback, faculty_id)
            .await?
            .ok_or_else(validation_not_found)?;

        tracing::info!(validation_id, faculty_id, "Feedback recorded");
        Ok(validation)
    }

    async fn find_validation(&self, validation_id: i64) -> Result<Validation, AppError> {
        self.validation_repo
            .get_validation(validation_id)
            .await?
            .ok_or_else(validation_not_found)
    }
}

fn validation_not_found() -> AppError {
    AppError::NotFound("Validation not found".to_string())
}

fn already_reviewed(status: ValidationStatus) -> AppError {
    AppError::Conflict(format!("Validation has already been reviewed ({status})"))
}
