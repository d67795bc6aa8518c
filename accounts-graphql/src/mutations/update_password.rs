use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use secrecy::Secret;

use accounts_application::UpdatePasswordUseCase;
use accounts_core::{Password, Principal, UserStore};

use crate::error::ApiError;
use crate::types::{UpdatePasswordPayload, UserType};

#[derive(Default)]
pub struct UpdatePasswordMutation;

#[Object]
impl UpdatePasswordMutation {
    /// Change the authenticated user's password. Requires a valid bearer
    /// token and the current password.
    #[tracing::instrument(name = "UpdatePassword", skip_all)]
    async fn update_password(
        &self,
        ctx: &Context<'_>,
        password: String,
        new_password: String,
    ) -> Result<UpdatePasswordPayload> {
        let user_store = ctx.data::<Arc<dyn UserStore>>()?;

        let principal = ctx
            .data_opt::<Principal>()
            .copied()
            .ok_or_else(|| ApiError::Unauthenticated.extend())?;

        let current_password =
            Password::try_from(Secret::from(password)).map_err(|e| ApiError::from(e).extend())?;
        let new_password = Password::try_from(Secret::from(new_password))
            .map_err(|e| ApiError::from(e).extend())?;

        let use_case = UpdatePasswordUseCase::new(user_store.as_ref());
        let user = use_case
            .execute(principal, current_password, new_password)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(UpdatePasswordPayload {
            user: UserType::from(user),
        })
    }
}
