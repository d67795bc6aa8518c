use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use secrecy::Secret;

use accounts_application::CreateUserUseCase;
use accounts_core::{Email, FlagOverrides, NewUser, Password, UserStore, Username};

use crate::error::ApiError;
use crate::types::{CreateUserPayload, UserType};

#[derive(Default)]
pub struct CreateUserMutation;

#[Object]
impl CreateUserMutation {
    /// Register a new account. Rejects duplicate usernames and email
    /// addresses before anything is persisted.
    #[tracing::instrument(name = "CreateUser", skip_all)]
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<CreateUserPayload> {
        let user_store = ctx.data::<Arc<dyn UserStore>>()?;

        let email = Email::try_from(email).map_err(|e| ApiError::from(e).extend())?;
        let username = Username::try_from(username).map_err(|e| ApiError::from(e).extend())?;
        let password =
            Password::try_from(Secret::from(password)).map_err(|e| ApiError::from(e).extend())?;

        let new_user = NewUser::new(email, username, password, FlagOverrides::default());

        let use_case = CreateUserUseCase::new(user_store.as_ref());
        let user = use_case
            .execute(new_user)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(CreateUserPayload {
            user: UserType::from(user),
            message: "User created successfully".to_string(),
            status: 201,
        })
    }
}
