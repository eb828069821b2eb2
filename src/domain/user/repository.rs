//! User repository trait

use async_trait::async_trait;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their login id (for signin)
    async fn get_by_login_id(&self, login_id: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user, assigning its id. Fails with `Conflict` on a taken login id.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;
}
