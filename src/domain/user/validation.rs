//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("loginId cannot be empty")]
    EmptyLoginId,

    #[error("loginId exceeds maximum length of {0} characters")]
    LoginIdTooLong(usize),

    #[error("loginId cannot contain whitespace")]
    LoginIdWhitespace,

    #[error("name cannot be empty")]
    EmptyName,

    #[error("name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("password should have at least {0} characters")]
    PasswordTooShort(usize),

    #[error("password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MAX_LOGIN_ID_LENGTH: usize = 150;
const MAX_NAME_LENGTH: usize = 150;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a login id
///
/// Rules:
/// - Cannot be empty
/// - Maximum 150 characters
/// - No whitespace
pub fn validate_login_id(login_id: &str) -> Result<(), UserValidationError> {
    if login_id.is_empty() {
        return Err(UserValidationError::EmptyLoginId);
    }

    if login_id.chars().count() > MAX_LOGIN_ID_LENGTH {
        return Err(UserValidationError::LoginIdTooLong(MAX_LOGIN_ID_LENGTH));
    }

    if login_id.chars().any(char::is_whitespace) {
        return Err(UserValidationError::LoginIdWhitespace);
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a password
///
/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
