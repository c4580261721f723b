use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::UserRepository;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// PostgreSQL-backed user store.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)
                .map_err(|e| RepositoryError::Database(format!("corrupt username: {}", e)))?,
            email: EmailAddress::new(row.email)
                .map_err(|e| RepositoryError::Database(format!("corrupt email: {}", e)))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate a driver error, reporting unique violations against `email`.
fn map_sqlx_error(error: sqlx::Error, email: &str) -> RepositoryError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(email.to_string());
        }
    }

    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RepositoryError::Unavailable(error.to_string()),
        _ => RepositoryError::Database(error.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, user.email.as_str()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, ""))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, email))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: User) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, user.email.as_str()))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(RepositoryError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ""))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
