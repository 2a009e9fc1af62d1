pub mod department;
pub mod skill;
pub mod sqlx_repo;
pub mod token;
pub mod user;
pub mod validation;
