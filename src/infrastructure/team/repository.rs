//! In-memory team repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// In-memory implementation of TeamRepository
#[derive(Debug)]
pub struct InMemoryTeamRepository {
    teams: RwLock<BTreeMap<TeamId, Team>>,
    next_id: AtomicI64,
}

impl InMemoryTeamRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.teams.read().await.get(&id).cloned())
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().await;

        let id = TeamId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let team = team.into_team(id, Utc::now());
        teams.insert(id, team.clone());

        Ok(team)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        Ok(self.teams.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        // BTreeMap iteration is already ordered by id
        Ok(self.teams.read().await.values().cloned().collect())
    }
}
