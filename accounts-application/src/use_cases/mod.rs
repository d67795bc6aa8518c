pub mod create_user;
pub mod fetch_users;
pub mod obtain_token;
pub mod refresh_token;
pub mod update_password;
