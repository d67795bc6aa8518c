use accounts_core::{Email, User, UserStore, UserStoreError, Username};

/// Error types for fetch users use case
#[derive(Debug, thiserror::Error)]
pub enum FetchUsersError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Optional exact-match filters. Both set means both must match.
#[derive(Debug, Default)]
pub struct UserFilter {
    pub username: Option<Username>,
    pub email: Option<Email>,
}

/// Fetch users use case - read-only listing and lookup of user
/// projections.
pub struct FetchUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> FetchUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "FetchUsersUseCase::execute", skip(self))]
    pub async fn execute(&self, filter: UserFilter) -> Result<Vec<User>, FetchUsersError> {
        let users = match (&filter.username, &filter.email) {
            (Some(username), email) => {
                let found = self.user_store.find_by_username(username).await?;
                found
                    .into_iter()
                    .filter(|user| email.as_ref().is_none_or(|e| &user.email == e))
                    .collect()
            }
            (None, Some(email)) => self.user_store.find_by_email(email).await?.into_iter().collect(),
            (None, None) => self.user_store.list_users().await?,
        };

        Ok(users)
    }
}
