use async_graphql::{ID, SimpleObject};
use chrono::{DateTime, Utc};

use accounts_core::User;

/// Read-facing projection of a stored user. Password material never
/// appears here.
#[derive(Debug, Clone, SimpleObject)]
pub struct UserType {
    pub id: ID,
    pub email: String,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserType {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email.to_string(),
            username: user.username.to_string(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct CreateUserPayload {
    pub user: UserType,
    pub message: String,
    pub status: i32,
}

#[derive(Debug, SimpleObject)]
pub struct TokenPayload {
    pub user: UserType,
    pub access_token: String,
    pub refresh_token: String,
    pub message: String,
    pub status: i32,
}

#[derive(Debug, SimpleObject)]
pub struct UpdatePasswordPayload {
    pub user: UserType,
}
