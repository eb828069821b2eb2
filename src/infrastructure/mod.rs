//! Infrastructure layer - Storage, auth and service implementations

pub mod auth;
pub mod logging;
pub mod observability;
pub mod player;
pub mod storage;
pub mod team;
pub mod user;
