use accounts_core::{
    TokenPair, TokenService, TokenServiceError, User, UserStore, UserStoreError,
};

/// Error types for refresh token use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Invalid refresh token")]
    InvalidToken,
    #[error("Token service error: {0}")]
    TokenServiceError(TokenServiceError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Refresh token use case - verifies a refresh token and issues a new
/// pair bound to the same user. A token naming a user that no longer
/// exists is treated as invalid, not as a store failure.
pub struct RefreshTokenUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenService + ?Sized,
{
    user_store: &'a U,
    token_service: &'a T,
}

impl<'a, U, T> RefreshTokenUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(user_store: &'a U, token_service: &'a T) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<(User, TokenPair), RefreshTokenError> {
        let user_id = self
            .token_service
            .verify_refresh(refresh_token)
            .map_err(|e| match e {
                TokenServiceError::InvalidToken => RefreshTokenError::InvalidToken,
                other => RefreshTokenError::TokenServiceError(other),
            })?;

        let user = self
            .user_store
            .get_user(user_id)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => RefreshTokenError::InvalidToken,
                other => RefreshTokenError::UserStoreError(other),
            })?;

        let pair = self
            .token_service
            .issue_pair(user.id)
            .map_err(RefreshTokenError::TokenServiceError)?;

        Ok((user, pair))
    }
}
