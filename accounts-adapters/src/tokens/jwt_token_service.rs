use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accounts_core::{TokenPair, TokenService, TokenServiceError};

use crate::config::JwtSettings;

/// Discriminates access from refresh tokens so one kind cannot be
/// replayed as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub kind: TokenKind,
}

/// Stateless JWT implementation of the token service port. HS256 with a
/// shared secret; verification is signature + expiry + kind, no server
/// side state.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtSettings,
}

impl JwtTokenService {
    pub fn new(config: JwtSettings) -> Self {
        Self { config }
    }

    fn generate_token(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        ttl_seconds: i64,
    ) -> Result<String, TokenServiceError> {
        let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or(
            TokenServiceError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenServiceError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        // Cast exp to a usize, which is what Claims expects
        let exp: usize = exp.try_into().map_err(|_| {
            TokenServiceError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            kind,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| TokenServiceError::UnexpectedError(e.to_string()))
    }

    fn decode_token(&self, token: &str, expected: TokenKind) -> Result<Uuid, TokenServiceError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenServiceError::InvalidToken)?;

        if claims.kind != expected {
            return Err(TokenServiceError::InvalidToken);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| TokenServiceError::InvalidToken)
    }
}

impl TokenService for JwtTokenService {
    fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenServiceError> {
        let access_token =
            self.generate_token(user_id, TokenKind::Access, self.config.access_ttl_seconds)?;
        let refresh_token =
            self.generate_token(user_id, TokenKind::Refresh, self.config.refresh_ttl_seconds)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn verify_access(&self, token: &str) -> Result<Uuid, TokenServiceError> {
        self.decode_token(token, TokenKind::Access)
    }

    fn verify_refresh(&self, token: &str) -> Result<Uuid, TokenServiceError> {
        self.decode_token(token, TokenKind::Refresh)
    }
}
