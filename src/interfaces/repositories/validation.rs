use async_trait::async_trait;

use crate::{
    entities::validation::{Validation, ValidationStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxValidationRepo,
};

#[async_trait]
pub trait ValidationRepository: Send + Sync {
    async fn get_validation(&self, id: i64) -> Result<Option<Validation>, AppError>;

    /// Moves a pending validation to `status`. `None` means the row was no
    /// longer pending (or vanished) when the update ran.
    async fn record_decision(
        &self,
        id: i64,
        status: ValidationStatus,
        faculty_id: i64,
    ) -> Result<Option<Validation>, AppError>;

    async fn update_feedback(
        &self,
        id: i64,
        feedback: &str,
        faculty_id: i64,
    ) -> Result<Option<Validation>, AppError>;
}

impl SqlxValidationRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxValidationRepo { pool }
    }
}

#[async_trait]
impl ValidationRepository for SqlxValidationRepo {
    async fn get_validation(&self, id: i64) -> Result<Option<Validation>, AppError> {
        let validation = sqlx::query_as::<_, Validation>(
            r#"
            SELECT id, status, feedback, skill_id, faculty_id, reviewed_at
            FROM validations
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(validation)
    }

    async fn record_decision(
        &self,
        id: i64,
        status: ValidationStatus,
        faculty_id: i64,
    ) -> Result<Option<Validation>, AppError> {
        let validation = sqlx::query_as::<_, Validation>(
            r#"
            UPDATE validations
            SET status = $2, faculty_id = $3, reviewed_at = NOW()
            WHERE id = $1 AND status = 'Pending'
            RETURNING id, status, feedback, skill_id, faculty_id, reviewed_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(faculty_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(validation)
    }

    async fn update_feedback(
        &self,
        id: i64,
        feedback: &str,
        faculty_id: i64,
    ) -> Result<Option<Validation>, AppError> {
        let validation = sqlx::query_as::<_, Validation>(
            r#"
            UPDATE validations
            SET feedback = $2, faculty_id = $3, reviewed_at = NOW()
            WHERE id = $1
            RETURNING id, status, feedback, skill_id, faculty_id, reviewed_at
            "#
        )
        .bind(id)
        .bind(feedback)
        .bind(faculty_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(validation)
    }
}
