use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use accounts_core::{Email, NewUser, Password, User, UserStore, UserStoreError, Username};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    is_staff: bool,
    is_superuser: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserStoreError> {
        Ok(User {
            id: self.id,
            email: Email::try_from(self.email)
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
            username: Username::try_from(self.username)
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at: self.created_at,
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password().clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let query = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (email, username, password_hash, is_staff, is_superuser)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, email, username, password_hash, is_staff, is_superuser, created_at
            "#,
        )
        .bind(new_user.email().as_str())
        .bind(new_user.username().as_str())
        .bind(password_hash.expose_secret())
        .bind(new_user.is_staff())
        .bind(new_user.is_superuser());

        let row = query.fetch_one(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        row.into_user()
    }

    #[tracing::instrument(name = "Looking up user by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, username, password_hash, is_staff, is_superuser, created_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_str());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    #[tracing::instrument(name = "Looking up user by username in PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, username, password_hash, is_staff, is_superuser, created_at
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username.as_str());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, username, password_hash, is_staff, is_superuser, created_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id);

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.into_user()
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, username, password_hash, is_staff, is_superuser, created_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_str());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        verify_password_hash(Secret::from(row.password_hash.clone()), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        row.into_user()
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: Uuid,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let query = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, username, password_hash, is_staff, is_superuser, created_at
                FROM users
                ORDER BY created_at
            "#,
        );

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub(crate) async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub(crate) async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
