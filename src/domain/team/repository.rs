//! Team repository trait

use async_trait::async_trait;

use super::entity::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for managing teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Persist a new team, assigning its id
    async fn create(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Delete a team by ID. Returns false if it did not exist.
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// List all teams ordered by id
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
}
