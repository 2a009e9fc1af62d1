pub mod auth;
pub mod departments;
pub mod extractors;
pub mod reviews;
pub mod skills;
