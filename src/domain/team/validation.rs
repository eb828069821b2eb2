//! Team validation utilities

use thiserror::Error;

/// Maximum length for team name
const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Team validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamValidationError {
    #[error("team name cannot be empty")]
    EmptyName,

    #[error("team name exceeds maximum length of {0} characters")]
    NameTooLong(usize),
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_names() {
        assert!(validate_team_name("FC Bepro").is_ok());
        assert!(validate_team_name("a").is_ok());
        assert!(validate_team_name(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_invalid_team_names() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(validate_team_name("  "), Err(TeamValidationError::EmptyName));
        assert_eq!(
            validate_team_name(&"a".repeat(101)),
            Err(TeamValidationError::NameTooLong(100))
        );
    }
}
