pub mod cookie;
pub mod password;
pub mod session;
