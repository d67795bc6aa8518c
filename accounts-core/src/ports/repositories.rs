use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    email::Email,
    password::Password,
    user::{NewUser, User},
    username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hashes the password and persists the account. The store's unique
    /// constraints are the race-proof backstop behind any pre-checks.
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError>;
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError>;
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;
    async fn set_new_password(
        &self,
        id: Uuid,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
}
