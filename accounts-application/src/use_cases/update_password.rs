use accounts_core::{Password, Principal, User, UserStore, UserStoreError};

/// Error types for update password use case
#[derive(Debug, thiserror::Error)]
pub enum UpdatePasswordError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Update password use case - verifies the caller's current password
/// before re-hashing and persisting the new one.
pub struct UpdatePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> UpdatePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(
        name = "UpdatePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        principal: Principal,
        current_password: Password,
        new_password: Password,
    ) -> Result<User, UpdatePasswordError> {
        let user = self
            .user_store
            .get_user(principal.user_id)
            .await
            .map_err(UpdatePasswordError::UserStoreError)?;

        self.user_store
            .authenticate_user(&user.email, &current_password)
            .await
            .map_err(|e| match e {
                UserStoreError::IncorrectPassword => UpdatePasswordError::IncorrectPassword,
                other => UpdatePasswordError::UserStoreError(other),
            })?;

        self.user_store
            .set_new_password(user.id, new_password)
            .await
            .map_err(UpdatePasswordError::UserStoreError)?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounts_core::{Email, NewUser, Username};
    use chrono::Utc;
    use secrecy::{ExposeSecret, Secret};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct MockUserStore {
        users: Arc<RwLock<HashMap<Uuid, (User, Password)>>>,
    }

    impl MockUserStore {
        async fn insert(&self, email: &str, password: &str) -> User {
            let user = User {
                id: Uuid::new_v4(),
                email: Email::try_from(email.to_string()).unwrap(),
                username: Username::try_from("test_user".to_string()).unwrap(),
                is_staff: false,
                is_superuser: false,
                created_at: Utc::now(),
            };
            let password =
                Password::try_from(Secret::from(password.to_string())).unwrap();
            self.users
                .write()
                .await
                .insert(user.id, (user.clone(), password));
            user
        }

        async fn stored_password(&self, id: Uuid) -> String {
            let users = self.users.read().await;
            users[&id].1.as_ref().expose_secret().clone()
        }
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

        async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
            let users = self.users.read().await;
            users
                .get(&id)
                .map(|(user, _)| user.clone())
                .ok_or(UserStoreError::UserNotFound)
        }

        async fn authenticate_user(
            &self,
            email: &Email,
            password: &Password,
        ) -> Result<User, UserStoreError> {
            let users = self.users.read().await;
            let (user, stored) = users
                .values()
                .find(|(user, _)| &user.email == email)
                .ok_or(UserStoreError::UserNotFound)?;

            if stored.as_ref().expose_secret() != password.as_ref().expose_secret() {
                return Err(UserStoreError::IncorrectPassword);
            }
            Ok(user.clone())
        }

        async fn set_new_password(
            &self,
            id: Uuid,
            new_password: Password,
        ) -> Result<(), UserStoreError> {
            let mut users = self.users.write().await;
            let entry = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
            entry.1 = new_password;
            Ok(())
        }

        async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
            unimplemented!()
        }
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_update_password_success() {
        let user_store = MockUserStore::default();
        let user = user_store.insert("test@example.com", "old_password").await;

        let use_case = UpdatePasswordUseCase::new(&user_store);
        let principal = Principal { user_id: user.id };

        let result = use_case
            .execute(principal, password("old_password"), password("new_password"))
            .await;

        assert!(result.is_ok());
        assert_eq!(user_store.stored_password(user.id).await, "new_password");
    }

    #[tokio::test]
    async fn test_update_password_incorrect_current_password() {
        let user_store = MockUserStore::default();
        let user = user_store.insert("test@example.com", "old_password").await;

        let use_case = UpdatePasswordUseCase::new(&user_store);
        let principal = Principal { user_id: user.id };

        let result = use_case
            .execute(principal, password("wrong_password"), password("new_password"))
            .await;

        assert!(matches!(result, Err(UpdatePasswordError::IncorrectPassword)));
        assert_eq!(user_store.stored_password(user.id).await, "old_password");
    }

    #[tokio::test]
    async fn test_update_password_unknown_principal() {
        let user_store = MockUserStore::default();
        let use_case = UpdatePasswordUseCase::new(&user_store);
        let principal = Principal {
            user_id: Uuid::new_v4(),
        };

        let result = use_case
            .execute(principal, password("old_password"), password("new_password"))
            .await;

        assert!(matches!(
            result,
            Err(UpdatePasswordError::UserStoreError(
                UserStoreError::UserNotFound
            ))
        ));
    }
}
