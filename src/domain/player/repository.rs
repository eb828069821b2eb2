//! Player repository trait

use async_trait::async_trait;

use super::entity::{JoinStatus, NewPlayer, Player, PlayerId};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for player records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Get a player by ID
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, DomainError>;

    /// Persist a new player. Fails with `Conflict` if the user already has a
    /// record in that team.
    async fn create(&self, player: NewPlayer) -> Result<Player, DomainError>;

    /// Overwrite the join status of a player
    async fn update_status(&self, id: PlayerId, status: JoinStatus)
        -> Result<Player, DomainError>;

    /// Delete a player. Returns false if it did not exist.
    async fn delete(&self, id: PlayerId) -> Result<bool, DomainError>;

    /// Delete every player of a team, returning how many were removed
    async fn delete_by_team(&self, team_id: TeamId) -> Result<u64, DomainError>;

    /// The record of one user in one team, if any
    async fn find_membership(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<Player>, DomainError>;

    /// All players of a team ordered by id
    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError>;

    /// All player records of a user ordered by id
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Player>, DomainError>;

    /// Number of APPROVED players in a team
    async fn count_approved(&self, team_id: TeamId) -> Result<usize, DomainError>;
}
