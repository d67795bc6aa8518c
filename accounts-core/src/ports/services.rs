use thiserror::Error;
use uuid::Uuid;

use crate::domain::token::TokenPair;

// TokenService port trait and errors
#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenServiceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Stateless token issuance and verification. Malformed, expired, or
/// wrong-kind tokens all surface as `InvalidToken`.
pub trait TokenService: Send + Sync {
    fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenServiceError>;
    fn verify_access(&self, token: &str) -> Result<Uuid, TokenServiceError>;
    fn verify_refresh(&self, token: &str) -> Result<Uuid, TokenServiceError>;
}
