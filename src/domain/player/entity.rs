//! Player entity and join status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::PlayerValidationError;
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Player identifier assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(i64);

impl PlayerId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Membership state of a player within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinStatus {
    /// Join request pending the creator's approval
    Requested,
    /// Active member of the team
    Approved,
}

impl JoinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Approved => "APPROVED",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// REQUESTED -> APPROVED is the only real transition; staying put is allowed.
    pub fn can_transition_to(&self, target: JoinStatus) -> bool {
        match (self, target) {
            (Self::Requested, Self::Approved) => true,
            (from, to) => *from == to,
        }
    }
}

impl std::str::FromStr for JoinStatus {
    type Err = PlayerValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUESTED" => Ok(Self::Requested),
            "APPROVED" => Ok(Self::Approved),
            other => Err(PlayerValidationError::UnknownJoinStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for JoinStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player entity: one user's membership (or pending request) in one team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    user_id: UserId,
    team_id: TeamId,
    join_status: JoinStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Player {
    /// Rebuild a player from persisted parts
    pub fn from_parts(
        id: PlayerId,
        user_id: UserId,
        team_id: TeamId,
        join_status: JoinStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            team_id,
            join_status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn join_status(&self) -> JoinStatus {
        self.join_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_approved(&self) -> bool {
        self.join_status.is_approved()
    }

    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Apply a join status change. Callers check authorization first.
    pub fn set_join_status(&mut self, status: JoinStatus) -> Result<(), PlayerValidationError> {
        if !self.join_status.can_transition_to(status) {
            return Err(PlayerValidationError::InvalidTransition {
                from: self.join_status,
                to: status,
            });
        }

        if self.join_status != status {
            self.join_status = status;
            self.updated_at = Utc::now();
        }

        Ok(())
    }
}

/// A player that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub user_id: UserId,
    pub team_id: TeamId,
    pub join_status: JoinStatus,
}

impl NewPlayer {
    pub fn new(user_id: UserId, team_id: TeamId, join_status: JoinStatus) -> Self {
        Self {
            user_id,
            team_id,
            join_status,
        }
    }

    /// Attach the repository-assigned id
    pub fn into_player(self, id: PlayerId, created_at: DateTime<Utc>) -> Player {
        Player::from_parts(
            id,
            self.user_id,
            self.team_id,
            self.join_status,
            created_at,
            created_at,
        )
    }
}
