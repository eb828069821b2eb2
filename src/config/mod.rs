//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
    StorageSettings, DEFAULT_JWT_SECRET, MAX_TOKEN_EXPIRATION_HOURS,
};
