//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{NewUser, User, UserActivity};
use social_core::error::DomainError;
use social_core::traits::{RepoResult, UserRepository};

use crate::models::{UserActivityModel, UserModel};

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run an UPDATE touching a single user, failing if the user is missing
    async fn update_one(&self, id: i64, query: &str) -> RepoResult<()> {
        let result = sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, confirmed, is_active, created_at, updated_at,
                   last_login_at, last_request_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, confirmed, is_active, created_at, updated_at,
                   last_login_at, last_request_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            ",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, confirmed, is_active, created_at, updated_at,
                      last_login_at, last_request_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(User::from(result))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn confirm_email(&self, id: i64) -> RepoResult<()> {
        self.update_one(
            id,
            r"
            UPDATE users
            SET confirmed = TRUE, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn set_refresh_token(&self, id: i64, token: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET refresh_token = $2
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_refresh_token(&self, id: i64) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, Option<String>>(
            r"
            SELECT refresh_token FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.flatten())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: i64) -> RepoResult<()> {
        self.update_one(
            id,
            r"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            ",
        )
        .await
    }

    #[instrument(skip(self), level = "debug")]
    async fn touch_last_request(&self, id: i64) -> RepoResult<()> {
        self.update_one(
            id,
            r"
            UPDATE users
            SET last_request_at = NOW()
            WHERE id = $1
            ",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_activity(&self, id: i64) -> RepoResult<Option<UserActivity>> {
        let result = sqlx::query_as::<_, UserActivityModel>(
            r"
            SELECT id, last_login_at, last_request_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserActivity::from))
    }
}
