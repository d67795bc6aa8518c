pub mod email;
pub mod password;
pub mod principal;
pub mod token;
pub mod user;
pub mod username;
