//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<UserId, User>,
    /// Index for login id -> user ID lookup
    login_index: HashMap<String, UserId>,
}

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            table: RwLock::new(UserTable::default()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn get_by_login_id(&self, login_id: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .login_index
            .get(login_id)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.login_index.contains_key(&user.login_id) {
            return Err(DomainError::conflict(format!(
                "loginId '{}' already exists",
                user.login_id
            )));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let user = user.into_user(id, Utc::now());

        table.login_index.insert(user.login_id().to_string(), id);
        table.users.insert(id, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(login_id: &str) -> NewUser {
        NewUser::new(login_id, "user name", "hashed_password")
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("bepro1")).await.unwrap();
        let second = repo.create(new_user("bepro2")).await.unwrap();

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_and_get_by_login_id() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("bepro")).await.unwrap();

        let by_id = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(by_id.login_id(), "bepro");

        let by_login = repo.get_by_login_id("bepro").await.unwrap().unwrap();
        assert_eq!(by_login.id(), created.id());

        assert!(repo.get_by_login_id("nobody").await.unwrap().is_none());
        assert!(repo.get(UserId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_id_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("bepro")).await.unwrap();

        let result = repo.create(new_user("bepro")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
