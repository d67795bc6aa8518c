use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use accounts_application::{FetchUsersUseCase, UserFilter};
use accounts_core::{Email, UserStore, Username};

use crate::error::ApiError;
use crate::types::UserType;

#[derive(Default)]
pub struct FetchUsersQuery;

#[Object]
impl FetchUsersQuery {
    /// List user projections, optionally narrowed to an exact username
    /// and/or normalized email match.
    #[tracing::instrument(name = "FetchUsers", skip_all)]
    async fn fetch_users(
        &self,
        ctx: &Context<'_>,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Vec<UserType>> {
        let user_store = ctx.data::<Arc<dyn UserStore>>()?;

        let filter = UserFilter {
            username: username
                .map(Username::try_from)
                .transpose()
                .map_err(|e| ApiError::from(e).extend())?,
            email: email
                .map(Email::try_from)
                .transpose()
                .map_err(|e| ApiError::from(e).extend())?,
        };

        let use_case = FetchUsersUseCase::new(user_store.as_ref());
        let users = use_case
            .execute(filter)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(users.into_iter().map(UserType::from).collect())
    }
}
