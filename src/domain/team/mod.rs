//! Team domain module
//!
//! A team is created by a user, who becomes its first approved player and its
//! sole authority for approvals, removals and deletion.

mod entity;
mod repository;
mod validation;

pub use entity::{NewTeam, Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
