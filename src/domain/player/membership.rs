//! Membership authorization rules
//!
//! Pure decisions over a team, the acting user and the player records
//! involved. Services load the records, ask these functions, then persist.
//!
//! - The team creator is enrolled APPROVED; everyone else starts REQUESTED.
//! - Only APPROVED members may see a team's roster.
//! - Only the team creator may approve a request or delete the team.
//! - A player may leave on their own; the creator may remove anyone but
//!   themself.

use thiserror::Error;

use super::entity::{JoinStatus, Player};
use crate::domain::team::Team;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Reasons a membership action is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("only the team creator can {0}")]
    NotTeamCreator(&'static str),

    #[error("only the player or the team creator can remove this player")]
    NotPlayerOrCreator,

    #[error("the team creator cannot leave the team; delete the team instead")]
    CreatorCannotLeave,

    #[error("join status cannot change from {from} to {to}")]
    InvalidTransition { from: JoinStatus, to: JoinStatus },

    #[error("player does not belong to this team")]
    PlayerNotInTeam,
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::NotTeamCreator(_) | MembershipError::NotPlayerOrCreator => {
                DomainError::forbidden(err.to_string())
            }
            MembershipError::CreatorCannotLeave => DomainError::conflict(err.to_string()),
            MembershipError::InvalidTransition { .. } => DomainError::validation(err.to_string()),
            MembershipError::PlayerNotInTeam => DomainError::internal(err.to_string()),
        }
    }
}

/// Outcome of an authorized status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The status moves to a new value
    Applied { from: JoinStatus, to: JoinStatus },
    /// The player already has the requested status
    Unchanged,
}

/// Kind of an authorized removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The player removes their own record
    Leave,
    /// The team creator removes someone else (including rejecting a request)
    RemovedByCreator,
}

/// Status a new player record starts with
pub fn initial_join_status(team: &Team, actor: UserId) -> JoinStatus {
    if team.is_creator(actor) {
        JoinStatus::Approved
    } else {
        JoinStatus::Requested
    }
}

/// Whether the actor's own record in a team grants sight of its roster
pub fn can_view_roster(membership: Option<&Player>) -> bool {
    membership.is_some_and(Player::is_approved)
}

/// Authorize `actor` setting `player`'s status to `target`
pub fn authorize_status_change(
    team: &Team,
    actor: UserId,
    player: &Player,
    target: JoinStatus,
) -> Result<StatusChange, MembershipError> {
    ensure_same_team(team, player)?;

    if !team.is_creator(actor) {
        return Err(MembershipError::NotTeamCreator("change a player's join status"));
    }

    let current = player.join_status();

    if !current.can_transition_to(target) {
        return Err(MembershipError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    if current == target {
        Ok(StatusChange::Unchanged)
    } else {
        Ok(StatusChange::Applied {
            from: current,
            to: target,
        })
    }
}

/// Authorize `actor` deleting `player`
pub fn authorize_removal(
    team: &Team,
    actor: UserId,
    player: &Player,
) -> Result<Removal, MembershipError> {
    ensure_same_team(team, player)?;

    let is_creator = team.is_creator(actor);

    if player.belongs_to(actor) {
        if is_creator {
            return Err(MembershipError::CreatorCannotLeave);
        }
        return Ok(Removal::Leave);
    }

    if is_creator {
        Ok(Removal::RemovedByCreator)
    } else {
        Err(MembershipError::NotPlayerOrCreator)
    }
}

/// Authorize `actor` deleting `team`
pub fn authorize_team_deletion(team: &Team, actor: UserId) -> Result<(), MembershipError> {
    if team.is_creator(actor) {
        Ok(())
    } else {
        Err(MembershipError::NotTeamCreator("delete the team"))
    }
}

fn ensure_same_team(team: &Team, player: &Player) -> Result<(), MembershipError> {
    if player.team_id() == team.id() {
        Ok(())
    } else {
        Err(MembershipError::PlayerNotInTeam)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::player::{NewPlayer, PlayerId};
    use crate::domain::team::TeamId;

    const CREATOR: UserId = UserId::new(1);
    const MEMBER: UserId = UserId::new(2);
    const OUTSIDER: UserId = UserId::new(3);

    fn team() -> Team {
        Team::from_parts(TeamId::new(10), CREATOR, "FC Bepro", Utc::now())
    }

    fn player(id: i64, user_id: UserId, status: JoinStatus) -> Player {
        NewPlayer::new(user_id, TeamId::new(10), status).into_player(PlayerId::new(id), Utc::now())
    }

    #[test]
    fn test_initial_join_status() {
        assert_eq!(initial_join_status(&team(), CREATOR), JoinStatus::Approved);
        assert_eq!(initial_join_status(&team(), MEMBER), JoinStatus::Requested);
    }

    #[test]
    fn test_roster_visibility() {
        let approved = player(1, MEMBER, JoinStatus::Approved);
        let requested = player(2, MEMBER, JoinStatus::Requested);

        assert!(can_view_roster(Some(&approved)));
        assert!(!can_view_roster(Some(&requested)));
        assert!(!can_view_roster(None));
    }

    #[test]
    fn test_only_creator_approves() {
        let request = player(2, MEMBER, JoinStatus::Requested);

        assert_eq!(
            authorize_status_change(&team(), CREATOR, &request, JoinStatus::Approved),
            Ok(StatusChange::Applied {
                from: JoinStatus::Requested,
                to: JoinStatus::Approved,
            })
        );
        assert_eq!(
            authorize_status_change(&team(), MEMBER, &request, JoinStatus::Approved),
            Err(MembershipError::NotTeamCreator("change a player's join status"))
        );
        assert!(authorize_status_change(&team(), OUTSIDER, &request, JoinStatus::Approved).is_err());
    }

    #[test]
    fn test_approval_is_idempotent_and_one_way() {
        let approved = player(2, MEMBER, JoinStatus::Approved);

        assert_eq!(
            authorize_status_change(&team(), CREATOR, &approved, JoinStatus::Approved),
            Ok(StatusChange::Unchanged)
        );
        assert_eq!(
            authorize_status_change(&team(), CREATOR, &approved, JoinStatus::Requested),
            Err(MembershipError::InvalidTransition {
                from: JoinStatus::Approved,
                to: JoinStatus::Requested,
            })
        );
    }

    #[test]
    fn test_removal_rules() {
        let member = player(2, MEMBER, JoinStatus::Approved);
        let creator = player(1, CREATOR, JoinStatus::Approved);

        assert_eq!(authorize_removal(&team(), MEMBER, &member), Ok(Removal::Leave));
        assert_eq!(
            authorize_removal(&team(), CREATOR, &member),
            Ok(Removal::RemovedByCreator)
        );
        assert_eq!(
            authorize_removal(&team(), OUTSIDER, &member),
            Err(MembershipError::NotPlayerOrCreator)
        );
        assert_eq!(
            authorize_removal(&team(), CREATOR, &creator),
            Err(MembershipError::CreatorCannotLeave)
        );
    }

    #[test]
    fn test_team_deletion() {
        assert!(authorize_team_deletion(&team(), CREATOR).is_ok());
        assert_eq!(
            authorize_team_deletion(&team(), MEMBER),
            Err(MembershipError::NotTeamCreator("delete the team"))
        );
    }

    #[test]
    fn test_player_from_other_team_is_rejected() {
        let stray = NewPlayer::new(MEMBER, TeamId::new(99), JoinStatus::Requested)
            .into_player(PlayerId::new(7), Utc::now());

        assert_eq!(
            authorize_removal(&team(), CREATOR, &stray),
            Err(MembershipError::PlayerNotInTeam)
        );
    }

    #[test]
    fn test_domain_error_mapping() {
        assert!(matches!(
            DomainError::from(MembershipError::NotPlayerOrCreator),
            DomainError::Forbidden { .. }
        ));
        assert!(matches!(
            DomainError::from(MembershipError::CreatorCannotLeave),
            DomainError::Conflict { .. }
        ));
        assert!(matches!(
            DomainError::from(MembershipError::InvalidTransition {
                from: JoinStatus::Approved,
                to: JoinStatus::Requested,
            }),
            DomainError::Validation { .. }
        ));
    }
}
