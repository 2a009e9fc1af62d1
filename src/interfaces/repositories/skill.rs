use async_trait::async_trait;

use crate::{
    entities::{
        skill::{Skill, SkillInsert, SkillWithStatus, Submission},
        validation::ValidationStatus,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Inserts the skill and its pending validation in one transaction.
    async fn create_skill_with_validation(&self, skill: &SkillInsert) -> Result<SkillWithStatus, AppError>;

    /// Skills owned by `student_id`, each joined with its validation.
    async fn list_skills_for_student(&self, student_id: i64) -> Result<Vec<SkillWithStatus>, AppError>;

    /// Skills whose submitting student belongs to `department_id`.
    async fn list_submissions_for_department(&self, department_id: i64) -> Result<Vec<Submission>, AppError>;

    /// Deletes a skill owned by `student_id`; its validation goes with it.
    async fn delete_skill(&self, skill_id: i64, student_id: i64) -> Result<(), AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn create_skill_with_validation(&self, skill: &SkillInsert) -> Result<SkillWithStatus, AppError> {
        // Dropping `tx` on an early return rolls the skill insert back
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (student_id, skill_name, level, evidence)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, skill_name, level, evidence, created_at
            "#
        )
        .bind(skill.student_id)
        .bind(&skill.skill_name)
        .bind(&skill.level)
        .bind(&skill.evidence)
        .fetch_one(&mut *tx)
        .await?;

        let (status, feedback): (ValidationStatus, Option<String>) = sqlx::query_as(
            r#"
            INSERT INTO validations (skill_id, status)
            VALUES ($1, 'Pending')
            RETURNING status, feedback
            "#
        )
        .bind(created.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SkillWithStatus {
            id: created.id,
            student_id: created.student_id,
            skill_name: created.skill_name,
            level: created.level,
            evidence: created.evidence,
            status,
            feedback,
        })
    }

    async fn list_skills_for_student(&self, student_id: i64) -> Result<Vec<SkillWithStatus>, AppError> {
        let skills = sqlx::query_as::<_, SkillWithStatus>(
            r#"
            SELECT s.id, s.student_id, s.skill_name, s.level, s.evidence, v.status, v.feedback
            FROM skills s
            JOIN validations v ON v.skill_id = s.id
            WHERE s.student_id = $1
            ORDER BY s.id
            "#
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn list_submissions_for_department(&self, department_id: i64) -> Result<Vec<Submission>, AppError> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT
                s.id,
                s.student_id,
                s.skill_name,
                s.level,
                s.evidence,
                v.status,
                v.feedback,
                u.name AS student_name,
                u.email AS student_email,
                v.id AS validation_id
            FROM skills s
            JOIN validations v ON v.skill_id = s.id
            JOIN users u ON u.id = s.student_id
            WHERE u.department_id = $1
            ORDER BY s.id
            "#
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }

    async fn delete_skill(&self, skill_id: i64, student_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND student_id = $2")
            .bind(skill_id)
            .bind(student_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }

        Ok(())
    }
}
