//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};
use crate::domain::user::UserId;

/// Team identifier assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TeamId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// `user_id` is the creator. The creator is the only user allowed to approve
/// join requests, remove other players and delete the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    id: TeamId,
    user_id: UserId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Rebuild a team from persisted parts
    pub fn from_parts(
        id: TeamId,
        user_id: UserId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            created_at,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether the given user created this team
    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A team that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub user_id: UserId,
    pub name: String,
}

impl NewTeam {
    /// Create a validated team draft. The name is trimmed.
    pub fn new(user_id: UserId, name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into().trim().to_string();
        validate_team_name(&name)?;

        Ok(Self { user_id, name })
    }

    /// Attach the repository-assigned id
    pub fn into_team(self, id: TeamId, created_at: DateTime<Utc>) -> Team {
        Team::from_parts(id, self.user_id, self.name, created_at)
    }
}
