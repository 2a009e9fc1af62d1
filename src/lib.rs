mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, storage};

use auth::{cookie::CookiePolicy, session::SessionService};
use repositories::sqlx_repo::{SqlxDepartmentRepo, SqlxSkillRepo, SqlxUserRepo, SqlxValidationRepo};
use storage::evidence::EvidenceStore;
use use_cases::{
    auth::AuthHandler,
    departments::DepartmentHandler,
    reviews::ReviewHandler,
    skills::SkillHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, SqlxDepartmentRepo, SessionService>;
pub type AppReviewHandler = ReviewHandler<SqlxUserRepo, SqlxSkillRepo, SqlxValidationRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub department_handler: DepartmentHandler<SqlxDepartmentRepo>,
    pub skill_handler: SkillHandler<SqlxSkillRepo>,
    pub review_handler: AppReviewHandler,
    pub evidence_store: EvidenceStore,
    pub cookie_policy: CookiePolicy,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let user_repo = SqlxUserRepo::new(pool.clone());
        let department_repo = SqlxDepartmentRepo::new(pool.clone());
        let skill_repo = SqlxSkillRepo::new(pool.clone());
        let validation_repo = SqlxValidationRepo::new(pool);

        AppState {
            auth_handler: AuthHandler::new(
                user_repo.clone(),
                department_repo.clone(),
                SessionService::new(config),
            ),
            department_handler: DepartmentHandler::new(department_repo),
            skill_handler: SkillHandler::new(skill_repo.clone()),
            review_handler: ReviewHandler::new(user_repo, skill_repo, validation_repo),
            evidence_store: EvidenceStore::new(&config.upload_dir),
            cookie_policy: CookiePolicy::new(config),
        }
    }
}
