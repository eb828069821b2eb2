//! Authentication API endpoints
//!
//! Signup and signin. Signin answers with a JWT that the other endpoints
//! expect in the `Authorization` header.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json};
use crate::api::users::UserResponse;
use crate::infrastructure::user::SignupRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Signup request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupApiRequest {
    pub login_id: String,
    pub password: String,
    pub name: String,
}

/// Signin request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninApiRequest {
    pub login_id: String,
    pub password: String,
}

/// Signin response: the token next to the usual data envelope
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub token: String,
    pub data: UserResponse,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<UserResponse>>), ApiError> {
    debug!(login_id = %request.login_id, "Signup");

    let user = state
        .user_service
        .signup(SignupRequest {
            login_id: request.login_id,
            name: request.name,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(UserResponse::from(&user))),
    ))
}

/// POST /auth/signin
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninApiRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    debug!(login_id = %request.login_id, "Signin");

    let user = state
        .user_service
        .authenticate(&request.login_id, &request.password)
        .await?
        .ok_or_else(|| ApiError::not_found("No user matches that loginId and password"))?;

    let token = state.jwt_service.generate(&user)?;

    Ok(Json(SigninResponse {
        token,
        data: UserResponse::from(&user),
    }))
}
