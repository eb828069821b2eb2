//! Player service: join requests, approvals and removals

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::player::membership::{
    authorize_removal, authorize_status_change, can_view_roster, initial_join_status,
};
use crate::domain::player::{
    JoinStatus, MembershipError, NewPlayer, Player, PlayerId, PlayerRepository, Removal,
    StatusChange,
};
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_join_approval, record_join_request};

/// Player service for team membership workflows
#[derive(Clone)]
pub struct PlayerService {
    players: Arc<dyn PlayerRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl PlayerService {
    /// Create a new player service
    pub fn new(players: Arc<dyn PlayerRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { players, teams }
    }

    /// Ask to join a team. The team creator is approved immediately.
    pub async fn request_join(&self, actor: UserId, team_id: TeamId) -> Result<Player, DomainError> {
        let team = self.require_team(team_id).await?;
        let status = initial_join_status(&team, actor);

        let player = self
            .players
            .create(NewPlayer::new(actor, team_id, status))
            .await?;

        // A concurrent team deletion may have swept players before this insert
        if self.teams.get(team_id).await?.is_none() {
            self.players.delete(player.id()).await?;
            return Err(DomainError::not_found(format!("Team '{}' not found", team_id)));
        }

        record_join_request(status);
        info!(
            player_id = %player.id(),
            user_id = %actor,
            team_id = %team_id,
            join_status = %status,
            "Join request created"
        );

        Ok(player)
    }

    /// Roster of a team, visible only to its APPROVED players.
    ///
    /// Everyone else, including callers asking about a missing team, gets an
    /// empty list.
    pub async fn list_for_team(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<Vec<Player>, DomainError> {
        let membership = self.players.find_membership(actor, team_id).await?;

        if !can_view_roster(membership.as_ref()) {
            debug!(user_id = %actor, team_id = %team_id, "Roster hidden from non-approved caller");
            return Ok(Vec::new());
        }

        self.players.list_by_team(team_id).await
    }

    /// The caller's own player records across all teams
    pub async fn list_mine(&self, actor: UserId) -> Result<Vec<Player>, DomainError> {
        self.players.list_by_user(actor).await
    }

    /// Change a player's join status. Only the team creator may do this.
    pub async fn update_status(
        &self,
        actor: UserId,
        player_id: PlayerId,
        status: JoinStatus,
    ) -> Result<Player, DomainError> {
        let player = self.require_player(player_id).await?;
        let team = self.team_of(&player).await?;

        let change = authorize_status_change(&team, actor, &player, status)
            .inspect_err(|e| log_refusal(actor, player_id, e))?;

        match change {
            StatusChange::Unchanged => Ok(player),
            StatusChange::Applied { from, to } => {
                let updated = self.players.update_status(player_id, to).await?;

                if to.is_approved() {
                    record_join_approval();
                }
                info!(
                    player_id = %player_id,
                    team_id = %team.id(),
                    from = %from,
                    to = %to,
                    "Join status changed"
                );

                Ok(updated)
            }
        }
    }

    /// Delete a player record: self-leave, or removal by the team creator
    pub async fn remove(&self, actor: UserId, player_id: PlayerId) -> Result<(), DomainError> {
        let player = self.require_player(player_id).await?;
        let team = self.team_of(&player).await?;

        let removal = authorize_removal(&team, actor, &player)
            .inspect_err(|e| log_refusal(actor, player_id, e))?;

        if !self.players.delete(player_id).await? {
            return Err(DomainError::not_found(format!(
                "Player '{}' not found",
                player_id
            )));
        }

        match removal {
            Removal::Leave => info!(player_id = %player_id, team_id = %team.id(), "Player left team"),
            Removal::RemovedByCreator => info!(
                player_id = %player_id,
                team_id = %team.id(),
                "Player removed by team creator"
            ),
        }

        Ok(())
    }

    async fn require_team(&self, team_id: TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))
    }

    async fn require_player(&self, player_id: PlayerId) -> Result<Player, DomainError> {
        self.players
            .get(player_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Player '{}' not found", player_id)))
    }

    async fn team_of(&self, player: &Player) -> Result<Team, DomainError> {
        self.teams.get(player.team_id()).await?.ok_or_else(|| {
            DomainError::internal(format!(
                "Player '{}' references missing team '{}'",
                player.id(),
                player.team_id()
            ))
        })
    }
}

fn log_refusal(actor: UserId, player_id: PlayerId, err: &MembershipError) {
    warn!(user_id = %actor, player_id = %player_id, reason = %err, "Membership action refused");
}
