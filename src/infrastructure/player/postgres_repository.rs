//! PostgreSQL player repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::player::{JoinStatus, NewPlayer, Player, PlayerId, PlayerRepository};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_foreign_key_violation, is_unique_violation, storage_error};

const PLAYER_COLUMNS: &str = "id, user_id, team_id, join_status, created_at, updated_at";

/// PostgreSQL implementation of PlayerRepository
#[derive(Debug, Clone)]
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        let row = sqlx::query(&format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get player", e))?;

        row.as_ref().map(row_to_player).transpose()
    }

    async fn create(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let row = sqlx::query(&format!(
            "INSERT INTO players (user_id, team_id, join_status) VALUES ($1, $2, $3) \
             RETURNING {PLAYER_COLUMNS}"
        ))
        .bind(player.user_id.value())
        .bind(player.team_id.value())
        .bind(player.join_status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!(
                    "User '{}' already has a player record in team '{}'",
                    player.user_id, player.team_id
                ))
            } else if is_foreign_key_violation(&e) {
                // The team was deleted after the caller looked it up
                DomainError::not_found(format!("Team '{}' not found", player.team_id))
            } else {
                storage_error("create player", e)
            }
        })?;

        row_to_player(&row)
    }

    async fn update_status(
        &self,
        id: PlayerId,
        status: JoinStatus,
    ) -> Result<Player, DomainError> {
        let row = sqlx::query(&format!(
            "UPDATE players SET join_status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {PLAYER_COLUMNS}"
        ))
        .bind(id.value())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("update player", e))?;

        match row {
            Some(row) => row_to_player(&row),
            None => Err(DomainError::not_found(format!("Player '{}' not found", id))),
        }
    }

    async fn delete(&self, id: PlayerId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete player", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_team(&self, team_id: TeamId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM players WHERE team_id = $1")
            .bind(team_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete team players", e))?;

        Ok(result.rows_affected())
    }

    async fn find_membership(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<Player>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE user_id = $1 AND team_id = $2"
        ))
        .bind(user_id.value())
        .bind(team_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find membership", e))?;

        row.as_ref().map(row_to_player).transpose()
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = $1 ORDER BY id"
        ))
        .bind(team_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list team players", e))?;

        rows.iter().map(row_to_player).collect()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Player>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list user players", e))?;

        rows.iter().map(row_to_player).collect()
    }

    async fn count_approved(&self, team_id: TeamId) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM players WHERE team_id = $1 AND join_status = $2",
        )
        .bind(team_id.value())
        .bind(JoinStatus::Approved.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("count approved players", e))?;

        Ok(count as usize)
    }
}

fn row_to_player(row: &sqlx::postgres::PgRow) -> Result<Player, DomainError> {
    let read = |e| storage_error("read player row", e);

    let id: i64 = row.try_get("id").map_err(read)?;
    let user_id: i64 = row.try_get("user_id").map_err(read)?;
    let team_id: i64 = row.try_get("team_id").map_err(read)?;
    let join_status: String = row.try_get("join_status").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

    let join_status: JoinStatus = join_status
        .parse()
        .map_err(|e| DomainError::storage(format!("Invalid join status in database: {}", e)))?;

    Ok(Player::from_parts(
        PlayerId::new(id),
        UserId::new(user_id),
        TeamId::new(team_id),
        join_status,
        created_at,
        updated_at,
    ))
}
