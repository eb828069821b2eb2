//! Player infrastructure: repositories and the membership service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresPlayerRepository;
pub use repository::InMemoryPlayerRepository;
pub use service::PlayerService;
