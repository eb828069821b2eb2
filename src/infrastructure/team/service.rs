//! Team service for team management

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::player::membership::authorize_team_deletion;
use crate::domain::player::{JoinStatus, NewPlayer, PlayerRepository};
use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_join_request;

/// A team together with its number of APPROVED players
#[derive(Debug, Clone)]
pub struct TeamSummary {
    pub team: Team,
    pub player_count: usize,
}

/// Team service for managing teams
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(teams: Arc<dyn TeamRepository>, players: Arc<dyn PlayerRepository>) -> Self {
        Self { teams, players }
    }

    /// Create a team owned by `actor` and enroll them as its first APPROVED player
    pub async fn create(&self, actor: UserId, name: &str) -> Result<Team, DomainError> {
        let new_team =
            NewTeam::new(actor, name).map_err(|e| DomainError::validation(e.to_string()))?;

        let team = self.teams.create(new_team).await?;

        let enrollment = self
            .players
            .create(NewPlayer::new(actor, team.id(), JoinStatus::Approved))
            .await;

        if let Err(e) = enrollment {
            error!(team_id = %team.id(), error = %e, "Failed to enroll team creator, removing team");

            if let Err(cleanup) = self.teams.delete(team.id()).await {
                error!(team_id = %team.id(), error = %cleanup, "Failed to remove orphaned team");
            }

            return Err(e);
        }

        record_join_request(JoinStatus::Approved);
        info!(team_id = %team.id(), user_id = %actor, name = %team.name(), "Team created");

        Ok(team)
    }

    /// List all teams with their approved player counts, ordered by id
    pub async fn list(&self) -> Result<Vec<TeamSummary>, DomainError> {
        let teams = self.teams.list().await?;
        let mut summaries = Vec::with_capacity(teams.len());

        for team in teams {
            summaries.push(self.summarize(team).await?);
        }

        debug!(count = summaries.len(), "Listed teams");

        Ok(summaries)
    }

    /// Get a team with its approved player count
    pub async fn get(&self, id: TeamId) -> Result<TeamSummary, DomainError> {
        let team = self
            .teams
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        self.summarize(team).await
    }

    /// Delete a team and all of its players. Only the creator may do this.
    pub async fn delete(&self, actor: UserId, id: TeamId) -> Result<(), DomainError> {
        let team = self
            .teams
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        authorize_team_deletion(&team, actor).inspect_err(|e| {
            warn!(user_id = %actor, team_id = %id, reason = %e, "Team deletion refused")
        })?;

        let removed_players = self.players.delete_by_team(id).await?;

        if !self.teams.delete(id).await? {
            return Err(DomainError::not_found(format!("Team '{}' not found", id)));
        }

        // Join requests that raced the first sweep
        let removed_players = removed_players + self.players.delete_by_team(id).await?;

        info!(team_id = %id, removed_players, "Team deleted");

        Ok(())
    }

    async fn summarize(&self, team: Team) -> Result<TeamSummary, DomainError> {
        let player_count = self.players.count_approved(team.id()).await?;
        Ok(TeamSummary { team, player_count })
    }
}
