pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    principal::Principal,
    token::TokenPair,
    user::{FlagOverrides, NewUser, User, UserError},
    username::Username,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{TokenService, TokenServiceError},
};
