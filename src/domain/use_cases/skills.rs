use validator::Validate;

use crate::{
    entities::skill::{NewSkill, SkillWithStatus},
    errors::AppError,
    repositories::skill::SkillRepository,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R) -> Self {
        SkillHandler { skill_repo }
    }

    /// Records a skill claim with a pending validation. Persistence failures
    /// are logged and surfaced as a generic error.
    pub async fn submit_skill(
        &self,
        student_id: i64,
        request: NewSkill,
        evidence: Option<String>,
    ) -> Result<SkillWithStatus, AppError> {
        request.validate()?;

        let insert = request.prepare_for_insert(student_id, evidence);

        self.skill_repo
            .create_skill_with_validation(&insert)
            .await
            .map_err(|e| {
                tracing::error!(student_id, "Skill submission rolled back: {}", e);
                AppError::InternalError("Could not save skill".to_string())
            })
    }

    pub async fn list_student_skills(&self, student_id: i64) -> Result<Vec<SkillWithStatus>, AppError> {
        self.skill_repo.list_skills_for_student(student_id).await
    }

    /// Deletes one of the student's own skills together with its validation
    pub async fn withdraw_skill(&self, student_id: i64, skill_id: i64) -> Result<(), AppError> {
        self.skill_repo.delete_skill(skill_id, student_id).await?;

        tracing::info!(student_id, skill_id, "Skill withdrawn");
        Ok(())
    }
}
