//! Player endpoints: join requests, approvals and removals

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{parse_id, ApiError, DataResponse, Json};
use crate::domain::player::{JoinStatus, Player, PlayerId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

pub fn create_players_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route("/{id}", put(update_player).delete(delete_player))
}

/// Request to join a team
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerApiRequest {
    pub team_id: i64,
}

/// Request to change a player's join status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerApiRequest {
    pub join_status: String,
}

/// Query for GET /players
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlayersQuery {
    pub team_id: Option<String>,
}

/// Player as exposed over HTTP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i64,
    pub user_id: i64,
    pub team_id: i64,
    pub join_status: JoinStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().value(),
            user_id: player.user_id().value(),
            team_id: player.team_id().value(),
            join_status: player.join_status(),
            created_at: player.created_at(),
            updated_at: player.updated_at(),
        }
    }
}

/// POST /players
pub async fn create_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreatePlayerApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<PlayerResponse>>), ApiError> {
    let team_id = TeamId::new(request.team_id);
    debug!(user_id = %user.id(), team_id = %team_id, "Requesting to join team");

    let player = state.player_service.request_join(user.id(), team_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(PlayerResponse::from(&player))),
    ))
}

/// GET /players?teamId=
///
/// Without `teamId` the caller's own player records are returned.
pub async fn list_players(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<ListPlayersQuery>,
) -> Result<Json<DataResponse<Vec<PlayerResponse>>>, ApiError> {
    let players = match query.team_id.as_deref() {
        Some(raw) => {
            let team_id: TeamId = parse_id(raw, "teamId")?;
            state.player_service.list_for_team(user.id(), team_id).await?
        }
        None => state.player_service.list_mine(user.id()).await?,
    };

    Ok(Json(DataResponse::new(
        players.iter().map(PlayerResponse::from).collect(),
    )))
}

/// PUT /players/{id}
pub async fn update_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(player_id): Path<String>,
    Json(request): Json<UpdatePlayerApiRequest>,
) -> Result<Json<DataResponse<PlayerResponse>>, ApiError> {
    let player_id: PlayerId = parse_id(&player_id, "id")?;
    let status = request
        .join_status
        .parse::<JoinStatus>()
        .map_err(DomainError::from)?;

    debug!(user_id = %user.id(), player_id = %player_id, join_status = %status, "Updating player");

    let player = state
        .player_service
        .update_status(user.id(), player_id, status)
        .await?;

    Ok(Json(DataResponse::new(PlayerResponse::from(&player))))
}

/// DELETE /players/{id}
pub async fn delete_player(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(player_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let player_id: PlayerId = parse_id(&player_id, "id")?;
    debug!(user_id = %user.id(), player_id = %player_id, "Removing player");

    state.player_service.remove(user.id(), player_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
