use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use uuid::Uuid;

use accounts_core::{Email, NewUser, Password, User, UserStore, UserStoreError, Username};

/// In-memory user store for tests and local development. Holds the
/// plaintext password secret instead of a hash; never use outside of a
/// test or dev wiring.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

#[derive(Clone)]
struct StoredUser {
    user: User,
    password: Password,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;

        let duplicate = users.values().any(|stored| {
            &stored.user.email == new_user.email() || &stored.user.username == new_user.username()
        });
        if duplicate {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email().clone(),
            username: new_user.username().clone(),
            is_staff: new_user.is_staff(),
            is_superuser: new_user.is_superuser(),
            created_at: Utc::now(),
        };

        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password: new_user.password().clone(),
            },
        );
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| &stored.user.email == email)
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| &stored.user.username == username)
            .map(|stored| stored.user.clone()))
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let stored = users
            .values()
            .find(|stored| &stored.user.email == email)
            .ok_or(UserStoreError::UserNotFound)?;

        if stored.password.as_ref().expose_secret() != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }

        Ok(stored.user.clone())
    }

    async fn set_new_password(
        &self,
        id: Uuid,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;

        stored.password = new_password;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut listed: Vec<User> = users.values().map(|stored| stored.user.clone()).collect();
        listed.sort_by_key(|user| user.created_at);
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use accounts_core::FlagOverrides;
    use secrecy::Secret;

    use super::*;

    fn new_user(email: &str, username: &str, password: &str) -> NewUser {
        NewUser::new(
            Email::try_from(email.to_string()).unwrap(),
            Username::try_from(username.to_string()).unwrap(),
            Password::try_from(Secret::from(password.to_string())).unwrap(),
            FlagOverrides::default(),
        )
    }

    #[tokio::test]
    async fn test_add_and_get_user() {
        let store = HashMapUserStore::new();
        let user = store
            .add_user(new_user("test@example.com", "alice", "password123"))
            .await
            .unwrap();

        let fetched = store.get_user(user.id).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_add_user_rejects_duplicate_email() {
        let store = HashMapUserStore::new();
        store
            .add_user(new_user("test@example.com", "alice", "password123"))
            .await
            .unwrap();

        let result = store
            .add_user(new_user("test@example.com", "bob", "password123"))
            .await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_add_user_rejects_duplicate_username() {
        let store = HashMapUserStore::new();
        store
            .add_user(new_user("first@example.com", "alice", "password123"))
            .await
            .unwrap();

        let result = store
            .add_user(new_user("second@example.com", "alice", "password123"))
            .await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_find_by_email_matches_normalized_form() {
        let store = HashMapUserStore::new();
        store
            .add_user(new_user("a@example.com", "alice", "password123"))
            .await
            .unwrap();

        let lookup = Email::try_from("A@EXAMPLE.COM".to_string()).unwrap();
        let found = store.find_by_email(&lookup).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let store = HashMapUserStore::new();
        store
            .add_user(new_user("test@example.com", "alice", "password123"))
            .await
            .unwrap();

        let email = Email::try_from("test@example.com".to_string()).unwrap();
        let good = Password::try_from(Secret::from("password123".to_string())).unwrap();
        let bad = Password::try_from(Secret::from("wrong_password".to_string())).unwrap();

        assert!(store.authenticate_user(&email, &good).await.is_ok());
        assert_eq!(
            store.authenticate_user(&email, &bad).await.unwrap_err(),
            UserStoreError::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn test_set_new_password() {
        let store = HashMapUserStore::new();
        let user = store
            .add_user(new_user("test@example.com", "alice", "password123"))
            .await
            .unwrap();

        let new_password = Password::try_from(Secret::from("new_password".to_string())).unwrap();
        store.set_new_password(user.id, new_password).await.unwrap();

        let email = Email::try_from("test@example.com".to_string()).unwrap();
        let old = Password::try_from(Secret::from("password123".to_string())).unwrap();
        let new = Password::try_from(Secret::from("new_password".to_string())).unwrap();

        assert_eq!(
            store.authenticate_user(&email, &old).await.unwrap_err(),
            UserStoreError::IncorrectPassword
        );
        assert!(store.authenticate_user(&email, &new).await.is_ok());
    }
}
