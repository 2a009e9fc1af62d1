pub mod department;
pub mod session;
pub mod skill;
pub mod user;
pub mod validation;
