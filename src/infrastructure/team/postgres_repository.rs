//! PostgreSQL team repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::storage_error;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, user_id, name, created_at FROM teams WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get team", e))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO teams (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(team.user_id.value())
        .bind(&team.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("create team", e))?;

        row_to_team(&row)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete team", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT id, user_id, name, created_at FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list teams", e))?;

        rows.iter().map(row_to_team).collect()
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| storage_error("read team row", e))?;
    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| storage_error("read team row", e))?;
    let name: String = row.try_get("name").map_err(|e| storage_error("read team row", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| storage_error("read team row", e))?;

    Ok(Team::from_parts(
        TeamId::new(id),
        UserId::new(user_id),
        name,
        created_at,
    ))
}
