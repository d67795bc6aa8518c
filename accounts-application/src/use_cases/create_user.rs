use accounts_core::{NewUser, User, UserStore, UserStoreError};

/// Error types for create user use case
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Create user use case - handles registration of plain and superuser
/// accounts. Duplicate checks run before the insert; the store's unique
/// constraints remain the last line of defence against concurrent
/// registrations.
pub struct CreateUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> CreateUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CreateUserUseCase::execute", skip(self, new_user))]
    pub async fn execute(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        if self
            .user_store
            .find_by_username(new_user.username())
            .await?
            .is_some()
        {
            return Err(CreateUserError::UsernameTaken);
        }

        if self
            .user_store
            .find_by_email(new_user.email())
            .await?
            .is_some()
        {
            return Err(CreateUserError::EmailTaken);
        }

        let user = self.user_store.add_user(new_user).await?;

        tracing::info!(username = %user.username, "user created");
        Ok(user)
    }
}
