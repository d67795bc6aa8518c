use accounts_core::{
    Email, Password, TokenPair, TokenService, TokenServiceError, User, UserStore, UserStoreError,
};

/// Error types for obtain token use case
#[derive(Debug, thiserror::Error)]
pub enum ObtainTokenError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Obtain token use case - authenticates credentials and issues a fresh
/// access/refresh pair. Unknown users and wrong passwords are collapsed
/// into one `InvalidCredentials` outcome so callers cannot probe for
/// registered addresses.
pub struct ObtainTokenUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenService + ?Sized,
{
    user_store: &'a U,
    token_service: &'a T,
}

impl<'a, U, T> ObtainTokenUseCase<'a, U, T>
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

    #[tracing::instrument(name = "ObtainTokenUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<(User, TokenPair), ObtainTokenError> {
        let user = self
            .user_store
            .authenticate_user(&email, &password)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                    ObtainTokenError::InvalidCredentials
                }
                other => ObtainTokenError::UserStoreError(other),
            })?;

        let pair = self.token_service.issue_pair(user.id)?;

        Ok((user, pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounts_core::{NewUser, Username};
    use chrono::Utc;
    use secrecy::{ExposeSecret, Secret};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct MockUserStore {
        users: Arc<RwLock<Vec<(User, Password)>>>,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn add_user(&self, _new_user: NewUser) -> Result<User, UserStoreError> {
            unimplemented!()
        }

        async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, UserStoreError> {
            unimplemented!()
        }

        async fn find_by_username(
            &self,
            _username: &Username,
        ) -> Result<Option<User>, UserStoreError> {
            unimplemented!()
        }

        async fn get_user(&self, _id: Uuid) -> Result<User, UserStoreError> {
            unimplemented!()
        }

        async fn authenticate_user(
            &self,
            email: &Email,
            password: &Password,
        ) -> Result<User, UserStoreError> {
            let users = self.users.read().await;
            let (user, stored) = users
                .iter()
                .find(|(user, _)| &user.email == email)
                .ok_or(UserStoreError::UserNotFound)?;

            if stored.as_ref().expose_secret() != password.as_ref().expose_secret() {
                return Err(UserStoreError::IncorrectPassword);
            }
            Ok(user.clone())
        }

        async fn set_new_password(
            &self,
            _id: Uuid,
            _new_password: Password,
        ) -> Result<(), UserStoreError> {
            unimplemented!()
        }

        async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
            unimplemented!()
        }
    }

    struct FakeTokenService;

    impl TokenService for FakeTokenService {
        fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenServiceError> {
            Ok(TokenPair {
                access_token: format!("access:{user_id}"),
                refresh_token: format!("refresh:{user_id}"),
            })
        }

        fn verify_access(&self, token: &str) -> Result<Uuid, TokenServiceError> {
            token
                .strip_prefix("access:")
                .and_then(|id| Uuid::parse_str(id).ok())
                .ok_or(TokenServiceError::InvalidToken)
        }

        fn verify_refresh(&self, token: &str) -> Result<Uuid, TokenServiceError> {
            token
                .strip_prefix("refresh:")
                .and_then(|id| Uuid::parse_str(id).ok())
                .ok_or(TokenServiceError::InvalidToken)
        }
    }

    async fn store_with_user(email: &str, password: &str) -> (MockUserStore, User) {
        let user = User {
            id: Uuid::new_v4(),
            email: Email::try_from(email.to_string()).unwrap(),
            username: Username::try_from("test_user".to_string()).unwrap(),
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        };
        let store = MockUserStore::default();
        store.users.write().await.push((
            user.clone(),
            Password::try_from(Secret::from(password.to_string())).unwrap(),
        ));
        (store, user)
    }

    #[tokio::test]
    async fn test_obtain_token_success() {
        let (user_store, user) = store_with_user("test@example.com", "password123").await;
        let use_case = ObtainTokenUseCase::new(&user_store, &FakeTokenService);

        let email = Email::try_from("test@example.com".to_string()).unwrap();
        let password = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let (authenticated, pair) = use_case.execute(email, password).await.unwrap();

        assert_eq!(authenticated.id, user.id);
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_obtain_token_wrong_password() {
        let (user_store, _) = store_with_user("test@example.com", "password123").await;
        let use_case = ObtainTokenUseCase::new(&user_store, &FakeTokenService);

        let email = Email::try_from("test@example.com".to_string()).unwrap();
        let password = Password::try_from(Secret::from("wrong_password".to_string())).unwrap();

        let result = use_case.execute(email, password).await;
        assert!(matches!(result, Err(ObtainTokenError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_obtain_token_unknown_user() {
        let user_store = MockUserStore::default();
        let use_case = ObtainTokenUseCase::new(&user_store, &FakeTokenService);

        let email = Email::try_from("nobody@example.com".to_string()).unwrap();
        let password = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = use_case.execute(email, password).await;
        assert!(matches!(result, Err(ObtainTokenError::InvalidCredentials)));
    }
}
