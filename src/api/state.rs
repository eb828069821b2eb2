//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::JwtService;
use crate::infrastructure::player::PlayerService;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub player_service: Arc<PlayerService>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Wire the services over one set of repositories
    pub fn new(
        repositories: Repositories,
        hasher: Arc<dyn PasswordHasher>,
        jwt_service: JwtService,
    ) -> Self {
        let Repositories {
            users,
            teams,
            players,
        } = repositories;

        Self {
            user_service: Arc::new(UserService::new(users, hasher)),
            team_service: Arc::new(TeamService::new(teams.clone(), players.clone())),
            player_service: Arc::new(PlayerService::new(players, teams)),
            jwt_service: Arc::new(jwt_service),
        }
    }
}
