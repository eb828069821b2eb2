//! Team endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{parse_id, ApiError, DataResponse, Json};
use crate::domain::team::{Team, TeamId};
use crate::infrastructure::team::TeamSummary;

pub fn create_teams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/{id}", get(get_team).delete(delete_team))
}

/// Request to create a team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Team as returned on creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().value(),
            user_id: team.user_id().value(),
            name: team.name().to_string(),
            created_at: team.created_at(),
        }
    }
}

/// Team with its approved player count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummaryResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub player_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&TeamSummary> for TeamSummaryResponse {
    fn from(summary: &TeamSummary) -> Self {
        Self {
            id: summary.team.id().value(),
            user_id: summary.team.user_id().value(),
            name: summary.team.name().to_string(),
            player_count: summary.player_count,
            created_at: summary.team.created_at(),
        }
    }
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<TeamResponse>>), ApiError> {
    debug!(user_id = %user.id(), name = %request.name, "Creating team");

    let team = state.team_service.create(user.id(), &request.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(TeamResponse::from(&team))),
    ))
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<DataResponse<Vec<TeamSummaryResponse>>>, ApiError> {
    let teams = state.team_service.list().await?;

    Ok(Json(DataResponse::new(
        teams.iter().map(TeamSummaryResponse::from).collect(),
    )))
}

/// GET /teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(team_id): Path<String>,
) -> Result<Json<DataResponse<TeamSummaryResponse>>, ApiError> {
    let team_id: TeamId = parse_id(&team_id, "id")?;

    let summary = state.team_service.get(team_id).await?;

    Ok(Json(DataResponse::new(TeamSummaryResponse::from(&summary))))
}

/// DELETE /teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let team_id: TeamId = parse_id(&team_id, "id")?;
    debug!(user_id = %user.id(), team_id = %team_id, "Deleting team");

    state.team_service.delete(user.id(), team_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_summary_response_shape() {
        let created_at = chrono::Utc::now();
        let team = Team::from_parts(TeamId::new(1), UserId::new(7), "Bepro FC", created_at);

        let json = serde_json::to_value(TeamSummaryResponse::from(&TeamSummary {
            team,
            player_count: 3,
        }))
        .unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 7);
        assert_eq!(json["name"], "Bepro FC");
        assert_eq!(json["playerCount"], 3);
        assert_eq!(json["createdAt"], serde_json::to_value(created_at).unwrap());
    }
}
