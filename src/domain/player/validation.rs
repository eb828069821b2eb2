//! Player validation errors

use thiserror::Error;

use super::entity::JoinStatus;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerValidationError {
    #[error("unknown join status '{0}'. Expected REQUESTED or APPROVED")]
    UnknownJoinStatus(String),

    #[error("join status cannot change from {from} to {to}")]
    InvalidTransition { from: JoinStatus, to: JoinStatus },
}

impl From<PlayerValidationError> for DomainError {
    fn from(err: PlayerValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}
