pub mod auth;
pub mod departments;
pub mod home;
pub mod reviews;
pub mod skills;
pub mod system;
pub mod uploads;
