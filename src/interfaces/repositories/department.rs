use async_trait::async_trait;

use crate::{
    entities::department::Department,
    errors::AppError,
    repositories::sqlx_repo::SqlxDepartmentRepo,
};

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn list_departments(&self) -> Result<Vec<Department>, AppError>;
    async fn department_exists(&self, id: i64) -> Result<bool, AppError>;

    /// Inserts any of `names` not already present; returns how many were added.
    async fn ensure_departments(&self, names: &[&str]) -> Result<u64, AppError>;
}

impl SqlxDepartmentRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxDepartmentRepo { pool }
    }
}

#[async_trait]
impl DepartmentRepository for SqlxDepartmentRepo {
    async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name FROM departments ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    async fn department_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn ensure_departments(&self, names: &[&str]) -> Result<u64, AppError> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO departments (name)
            SELECT UNNEST($1::text[])
            ON CONFLICT (name) DO NOTHING
            "#
        )
        .bind(names)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
