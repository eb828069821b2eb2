//! Player domain
//!
//! A player is one user's membership in one team. It starts as a join
//! request (REQUESTED) and becomes an active member (APPROVED) once the team
//! creator approves it.

mod entity;
pub mod membership;
mod repository;
mod validation;

pub use entity::{JoinStatus, NewPlayer, Player, PlayerId};
pub use membership::{MembershipError, Removal, StatusChange};
pub use repository::PlayerRepository;
pub use validation::PlayerValidationError;

#[cfg(test)]
pub use repository::MockPlayerRepository;
