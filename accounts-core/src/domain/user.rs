use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, password::Password, username::Username};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("The email must be set")]
    MissingEmail,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("The username must be set")]
    MissingUsername,
    #[error("Username must be at most 50 characters")]
    UsernameTooLong,
    #[error("Username must not contain whitespace")]
    UsernameContainsWhitespace,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Superuser must have is_staff=true")]
    SuperuserMustBeStaff,
    #[error("Superuser must have is_superuser=true")]
    SuperuserMustBeSuperuser,
}

/// Optional overrides for the privilege flags of a new account.
///
/// Plain accounts default both flags to false, superuser accounts to true;
/// an explicit override always wins where the factory allows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagOverrides {
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// A not-yet-persisted account. The only place a plaintext password
/// travels alongside identity fields; the store hashes it on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    email: Email,
    username: Username,
    password: Password,
    is_staff: bool,
    is_superuser: bool,
}

impl NewUser {
    pub fn new(
        email: Email,
        username: Username,
        password: Password,
        overrides: FlagOverrides,
    ) -> Self {
        Self {
            email,
            username,
            password,
            is_staff: overrides.is_staff.unwrap_or(false),
            is_superuser: overrides.is_superuser.unwrap_or(false),
        }
    }

    /// Superuser factory. Both flags default to true and must resolve to
    /// true; an override clearing either is rejected.
    pub fn superuser(
        email: Email,
        username: Username,
        password: Password,
        overrides: FlagOverrides,
    ) -> Result<Self, UserError> {
        if !overrides.is_staff.unwrap_or(true) {
            return Err(UserError::SuperuserMustBeStaff);
        }
        if !overrides.is_superuser.unwrap_or(true) {
            return Err(UserError::SuperuserMustBeSuperuser);
        }
        Ok(Self {
            email,
            username,
            password,
            is_staff: true,
            is_superuser: true,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

/// Persisted account projection. Carries no password material.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub username: Username,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}
