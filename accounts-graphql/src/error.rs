use async_graphql::ErrorExtensions;
use thiserror::Error;

use accounts_application::{
    CreateUserError, FetchUsersError, ObtainTokenError, RefreshTokenError, UpdatePasswordError,
};
use accounts_core::{TokenServiceError, UserError, UserStoreError};

/// The one tagged failure type crossing the transport boundary. Every
/// operation failure is decided once, converted here, and surfaced as a
/// GraphQL error carrying `status` and `kind` extensions - error values
/// never travel as mutation data.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("You must be logged in to perform this action")]
    Unauthenticated,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> i32 {
        match self {
            ApiError::Validation(_) | ApiError::Unexpected(_) => 400,
            ApiError::InvalidCredentials | ApiError::InvalidToken | ApiError::Unauthenticated => {
                401
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Unexpected(_) => "UNEXPECTED",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("status", self.status());
            e.set("kind", self.kind());
        })
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::Validation(error.to_string()),
            UserStoreError::UserNotFound => ApiError::Validation(error.to_string()),
            UserStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            UserStoreError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<TokenServiceError> for ApiError {
    fn from(error: TokenServiceError) -> Self {
        match error {
            TokenServiceError::InvalidToken => ApiError::InvalidToken,
            TokenServiceError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<CreateUserError> for ApiError {
    fn from(error: CreateUserError) -> Self {
        match error {
            CreateUserError::UsernameTaken | CreateUserError::EmailTaken => {
                ApiError::Validation(error.to_string())
            }
            CreateUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdatePasswordError> for ApiError {
    fn from(error: UpdatePasswordError) -> Self {
        match error {
            UpdatePasswordError::IncorrectPassword => ApiError::InvalidCredentials,
            UpdatePasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ObtainTokenError> for ApiError {
    fn from(error: ObtainTokenError) -> Self {
        match error {
            ObtainTokenError::InvalidCredentials => ApiError::InvalidCredentials,
            ObtainTokenError::TokenServiceError(e) => e.into(),
            ObtainTokenError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<RefreshTokenError> for ApiError {
    fn from(error: RefreshTokenError) -> Self {
        match error {
            RefreshTokenError::InvalidToken => ApiError::InvalidToken,
            RefreshTokenError::TokenServiceError(e) => e.into(),
            RefreshTokenError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<FetchUsersError> for ApiError {
    fn from(error: FetchUsersError) -> Self {
        match error {
            FetchUsersError::UserStoreError(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_bad_requests() {
        let error = ApiError::from(CreateUserError::UsernameTaken);
        assert_eq!(error.status(), 400);
        assert_eq!(error.to_string(), "Username already exists");
    }

    #[test]
    fn credential_failures_are_unauthorized() {
        assert_eq!(ApiError::from(ObtainTokenError::InvalidCredentials).status(), 401);
        assert_eq!(ApiError::from(RefreshTokenError::InvalidToken).status(), 401);
        assert_eq!(ApiError::Unauthenticated.status(), 401);
    }

    #[test]
    fn extensions_carry_status_and_kind() {
        let error = ApiError::InvalidToken.extend();
        let extensions = error.extensions.expect("extensions set");
        assert_eq!(extensions.get("status"), Some(&async_graphql::Value::from(401)));
        assert_eq!(
            extensions.get("kind"),
            Some(&async_graphql::Value::from("INVALID_TOKEN"))
        );
    }
}
