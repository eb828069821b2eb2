//! User endpoints

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json};
use crate::domain::user::User;

pub fn create_users_router() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// User as exposed over HTTP. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub login_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            login_id: user.login_id().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// GET /users/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<DataResponse<UserResponse>>, ApiError> {
    Ok(Json(DataResponse::new(UserResponse::from(&user))))
}
