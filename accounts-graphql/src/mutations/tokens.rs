use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use secrecy::Secret;

use accounts_application::{ObtainTokenUseCase, RefreshTokenUseCase};
use accounts_core::{Email, Password, TokenService, UserStore};

use crate::error::ApiError;
use crate::types::{TokenPayload, UserType};

#[derive(Default)]
pub struct TokenMutation;

#[Object]
impl TokenMutation {
    /// Authenticate credentials and issue a fresh access/refresh pair.
    /// Malformed input and wrong credentials are indistinguishable to the
    /// caller.
    #[tracing::instrument(name = "ObtainToken", skip_all)]
    async fn obtain_token(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<TokenPayload> {
        let user_store = ctx.data::<Arc<dyn UserStore>>()?;
        let token_service = ctx.data::<Arc<dyn TokenService>>()?;

        let email =
            Email::try_from(email).map_err(|_| ApiError::InvalidCredentials.extend())?;
        let password = Password::try_from(Secret::from(password))
            .map_err(|_| ApiError::InvalidCredentials.extend())?;

        let use_case = ObtainTokenUseCase::new(user_store.as_ref(), token_service.as_ref());
        let (user, pair) = use_case
            .execute(email, password)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(TokenPayload {
            user: UserType::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            message: "User logged in successfully".to_string(),
            status: 200,
        })
    }

    /// Exchange a valid refresh token for a new token pair bound to the
    /// same user.
    #[tracing::instrument(name = "RefreshToken", skip_all)]
    async fn refresh_token(&self, ctx: &Context<'_>, refresh_token: String) -> Result<TokenPayload> {
        let user_store = ctx.data::<Arc<dyn UserStore>>()?;
        let token_service = ctx.data::<Arc<dyn TokenService>>()?;

        let use_case = RefreshTokenUseCase::new(user_store.as_ref(), token_service.as_ref());
        let (user, pair) = use_case
            .execute(&refresh_token)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(TokenPayload {
            user: UserType::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            message: "Token refreshed successfully".to_string(),
            status: 200,
        })
    }
}
