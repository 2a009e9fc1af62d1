use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use std::time::Duration;

use crate::constants::DEFAULT_DEPARTMENTS;
use crate::repositories::department::DepartmentRepository;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_retries = 5;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        match PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Database connection established.");
                return Ok(pool);
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                warn!(
                    "Failed to connect to database (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds);

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied.");
    Ok(())
}

/// Pre-populates the department directory. Failures are logged and
/// swallowed: the service still starts, with whatever departments exist.
pub async fn seed_departments<R: DepartmentRepository>(repo: &R) {
    match repo.ensure_departments(DEFAULT_DEPARTMENTS).await {
        Ok(0) => info!("Departments already present."),
        Ok(added) => info!("{} departments added.", added),
        Err(e) => tracing::error!("Error adding departments: {}", e),
    }
}
