//! Team Roster API
//!
//! A JSON backend for registering users, creating teams, and managing
//! team membership:
//! - Signup and signin with argon2 password hashes and HS256 JWTs
//! - Teams owned by their creator, who is enrolled on creation
//! - Join requests approved by the team creator
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::DomainError;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType},
    user::Argon2Hasher,
};
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = storage_config_from(config)?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let repositories = StorageFactory::create(&storage_config).await?;

    if config.auth.uses_default_secret() {
        warn!("Using the built-in JWT secret; set APP__AUTH__JWT_SECRET in production");
    }

    let jwt_service = JwtService::new(JwtConfig::from(&config.auth));

    Ok(AppState::new(
        repositories,
        Arc::new(Argon2Hasher::new()),
        jwt_service,
    ))
}

/// Resolve the storage backend settings into a factory configuration
pub fn storage_config_from(config: &AppConfig) -> Result<StorageConfig, DomainError> {
    let settings = &config.storage;

    match settings.backend.parse::<StorageType>()? {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings.resolve_database_url().ok_or_else(|| {
                DomainError::configuration(
                    "PostgreSQL storage requires storage.database_url or DATABASE_URL",
                )
            })?;

            Ok(StorageConfig::postgres(
                PostgresConfig::new(url).with_max_connections(settings.max_connections),
            ))
        }
    }
}
