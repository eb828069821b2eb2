//! In-memory player repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::player::{JoinStatus, NewPlayer, Player, PlayerId, PlayerRepository};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of PlayerRepository
#[derive(Debug)]
pub struct InMemoryPlayerRepository {
    players: RwLock<BTreeMap<PlayerId, Player>>,
    next_id: AtomicI64,
}

impl InMemoryPlayerRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            players: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn create(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let mut players = self.players.write().await;

        let duplicate = players
            .values()
            .any(|p| p.user_id() == player.user_id && p.team_id() == player.team_id);

        if duplicate {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a player record in team '{}'",
                player.user_id, player.team_id
            )));
        }

        let id = PlayerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let player = player.into_player(id, Utc::now());
        players.insert(id, player.clone());

        Ok(player)
    }

    async fn update_status(
        &self,
        id: PlayerId,
        status: JoinStatus,
    ) -> Result<Player, DomainError> {
        let mut players = self.players.write().await;

        let player = players
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Player '{}' not found", id)))?;

        player.set_join_status(status)?;

        Ok(player.clone())
    }

    async fn delete(&self, id: PlayerId) -> Result<bool, DomainError> {
        Ok(self.players.write().await.remove(&id).is_some())
    }

    async fn delete_by_team(&self, team_id: TeamId) -> Result<u64, DomainError> {
        let mut players = self.players.write().await;
        let before = players.len();

        players.retain(|_, p| p.team_id() != team_id);

        Ok((before - players.len()) as u64)
    }

    async fn find_membership(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<Player>, DomainError> {
        Ok(self
            .players
            .read()
            .await
            .values()
            .find(|p| p.user_id() == user_id && p.team_id() == team_id)
            .cloned())
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .players
            .read()
            .await
            .values()
            .filter(|p| p.team_id() == team_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .players
            .read()
            .await
            .values()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn count_approved(&self, team_id: TeamId) -> Result<usize, DomainError> {
        Ok(self
            .players
            .read()
            .await
            .values()
            .filter(|p| p.team_id() == team_id && p.is_approved())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM: TeamId = TeamId::new(1);
    const OTHER_TEAM: TeamId = TeamId::new(2);

    fn request(user: i64, team: TeamId) -> NewPlayer {
        NewPlayer::new(UserId::new(user), team, JoinStatus::Requested)
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_membership() {
        let repo = InMemoryPlayerRepository::new();

        repo.create(request(1, TEAM)).await.unwrap();
        repo.create(request(1, OTHER_TEAM)).await.unwrap();

        let result = repo.create(request(1, TEAM)).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = InMemoryPlayerRepository::new();
        let player = repo.create(request(1, TEAM)).await.unwrap();

        let approved = repo
            .update_status(player.id(), JoinStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.join_status(), JoinStatus::Approved);

        let result = repo.update_status(player.id(), JoinStatus::Requested).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = repo
            .update_status(PlayerId::new(99), JoinStatus::Approved)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_queries() {
        let repo = InMemoryPlayerRepository::new();
        let first = repo.create(request(1, TEAM)).await.unwrap();
        repo.create(request(2, TEAM)).await.unwrap();
        repo.create(request(1, OTHER_TEAM)).await.unwrap();
        repo.update_status(first.id(), JoinStatus::Approved)
            .await
            .unwrap();

        assert_eq!(repo.list_by_team(TEAM).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_user(UserId::new(1)).await.unwrap().len(), 2);
        assert_eq!(repo.count_approved(TEAM).await.unwrap(), 1);
        assert_eq!(repo.count_approved(OTHER_TEAM).await.unwrap(), 0);

        let membership = repo
            .find_membership(UserId::new(2), TEAM)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(membership.join_status(), JoinStatus::Requested);
        assert!(repo
            .find_membership(UserId::new(2), OTHER_TEAM)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_by_team() {
        let repo = InMemoryPlayerRepository::new();
        repo.create(request(1, TEAM)).await.unwrap();
        repo.create(request(2, TEAM)).await.unwrap();
        let kept = repo.create(request(1, OTHER_TEAM)).await.unwrap();

        assert_eq!(repo.delete_by_team(TEAM).await.unwrap(), 2);
        assert!(repo.list_by_team(TEAM).await.unwrap().is_empty());
        assert!(repo.get(kept.id()).await.unwrap().is_some());

        assert!(repo.delete(kept.id()).await.unwrap());
        assert!(!repo.delete(kept.id()).await.unwrap());
    }
}
