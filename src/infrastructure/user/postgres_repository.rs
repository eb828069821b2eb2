//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_unique_violation, storage_error};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, login_id, name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_login_id(&self, login_id: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, login_id, name, password_hash, created_at
            FROM users
            WHERE login_id = $1
            "#,
        )
        .bind(login_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get user by loginId", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (login_id, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, login_id, name, password_hash, created_at
            "#,
        )
        .bind(&user.login_id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("loginId '{}' already exists", user.login_id))
            } else {
                storage_error("create user", e)
            }
        })?;

        row_to_user(&row)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count users", e))?;

        Ok(count as usize)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| storage_error("read user row", e))?;
    let login_id: String = row
        .try_get("login_id")
        .map_err(|e| storage_error("read user row", e))?;
    let name: String = row.try_get("name").map_err(|e| storage_error("read user row", e))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| storage_error("read user row", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| storage_error("read user row", e))?;

    Ok(User::from_parts(
        UserId::new(id),
        login_id,
        name,
        password_hash,
        created_at,
    ))
}
