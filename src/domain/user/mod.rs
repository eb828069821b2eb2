//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including user entities, validation, and repository traits.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_login_id, validate_name, validate_password, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
