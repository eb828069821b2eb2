//! User infrastructure module
//!
//! Argon2 password hashing, the in-memory and PostgreSQL user repositories
//! and the signup/authentication service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{SignupRequest, UserService};
