//! User service for signup and authentication

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{
    validate_login_id, validate_name, validate_password, NewUser, User, UserId, UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_signup;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub login_id: String,
    pub name: String,
    pub password: String,
}

/// User service for signup and authentication
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        validate_login_id(&request.login_id)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self
            .repository
            .get_by_login_id(&request.login_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "loginId '{}' already exists",
                request.login_id
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser::new(request.login_id, request.name, password_hash))
            .await?;

        record_signup();
        info!(user_id = %user.id(), login_id = %user.login_id(), "User signed up");

        Ok(user)
    }

    /// Authenticate a user with loginId and password.
    ///
    /// Unknown loginIds and wrong passwords both yield `None`.
    pub async fn authenticate(
        &self,
        login_id: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.repository.get_by_login_id(login_id).await? else {
            debug!(login_id = %login_id, "Signin for unknown loginId");
            return Ok(None);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(login_id = %login_id, "Signin with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Number of registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
