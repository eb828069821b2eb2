use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::players;
use super::state::AppState;
use super::teams;
use super::users;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Like [`create_router`], also serving Prometheus metrics at `metrics_path`
pub fn create_router_with_metrics(
    state: AppState,
    metrics_path: &str,
    metrics: PrometheusMetrics,
) -> Router {
    build_router(state, Some(create_metrics_router(metrics_path, metrics)))
}

fn build_router(state: AppState, metrics: Option<Router<AppState>>) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Signup and signin need no token
        .nest("/auth", auth::create_auth_router())
        .nest("/users", users::create_users_router())
        .nest("/teams", teams::create_teams_router())
        .nest("/players", players::create_players_router())
        .route_layer(middleware::from_fn(metrics_middleware));

    if let Some(metrics) = metrics {
        router = router.merge(metrics);
    }

    router
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::auth::JwtService;
    use crate::infrastructure::storage::Repositories;
    use crate::infrastructure::user::Argon2Hasher;

    struct TestApp {
        router: Router,
        state: AppState,
    }

    impl TestApp {
        fn new() -> Self {
            let hasher = Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap());
            let state = AppState::new(
                Repositories::in_memory(),
                hasher,
                JwtService::with_default_config(),
            );

            Self {
                router: create_router(state.clone()),
                state,
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);

            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }

            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };

            (status, value)
        }

        /// Sign up and sign in, returning (user id, token)
        async fn register(&self, login_id: &str) -> (i64, String) {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/auth/signup",
                    None,
                    Some(json!({"loginId": login_id, "password": "password1234", "name": login_id})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            let id = body["data"]["id"].as_i64().unwrap();

            let (status, body) = self
                .send(
                    Method::POST,
                    "/auth/signin",
                    None,
                    Some(json!({"loginId": login_id, "password": "password1234"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);

            (id, body["token"].as_str().unwrap().to_string())
        }

        async fn create_team(&self, token: &str, name: &str) -> i64 {
            let (status, body) = self
                .send(Method::POST, "/teams", Some(token), Some(json!({"name": name})))
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["data"]["id"].as_i64().unwrap()
        }
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({"loginId": "bepro", "password": "pwd", "name": "bepro"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password should have at least 8 characters");
    }

    #[tokio::test]
    async fn test_signup_and_signin() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({"loginId": "bepro", "password": "password1234", "name": "bepro"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["loginId"], "bepro");
        assert_eq!(body["data"]["name"], "bepro");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("passwordHash").is_none());
        assert!(body["data"]["createdAt"].is_string());
        let user_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/signin",
                None,
                Some(json!({"loginId": "bepro", "password": "password1234"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], user_id);

        let token = body["token"].as_str().unwrap();
        let claims = app.state.jwt_service.validate(token).unwrap();
        assert_eq!(claims.id, user_id);

        let (status, body) = app.send(Method::GET, "/users/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], user_id);
    }

    #[tokio::test]
    async fn test_signup_duplicate_and_bad_signin() {
        let app = TestApp::new();
        app.register("bepro").await;

        let (status, _) = app
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({"loginId": "bepro", "password": "password5678", "name": "again"})),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/signin",
                None,
                Some(json!({"loginId": "bepro", "password": "wrong-password"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let app = TestApp::new();

        let (status, body) = app
            .send(Method::POST, "/auth/signup", None, Some(json!({"loginId": "bepro"})))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["type"], "invalid_request_error");
        assert_eq!(body["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_bare_token_is_accepted() {
        let app = TestApp::new();
        let (user_id, token) = app.register("bepro").await;

        let request = Request::builder()
            .uri("/users/me")
            .header(header::AUTHORIZATION, token)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], user_id);
    }

    #[tokio::test]
    async fn test_endpoints_require_token() {
        let app = TestApp::new();

        let (status, _) = app
            .send(Method::POST, "/teams", None, Some(json!({"name": "Bepro FC"})))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.send(Method::GET, "/teams", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.send(Method::GET, "/users/me", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_team_and_player_flow() {
        let app = TestApp::new();
        let (creator_id, creator) = app.register("bepro").await;
        let (member_id, member) = app.register("bepro2").await;

        // Creator is enrolled on creation
        let team_id = app.create_team(&creator, "Bepro FC").await;
        let (status, body) = app.send(Method::GET, "/teams", Some(&creator), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], team_id);
        assert_eq!(body["data"][0]["userId"], creator_id);
        assert_eq!(body["data"][0]["playerCount"], 1);

        // Join request
        let (status, body) = app
            .send(Method::POST, "/players", Some(&member), Some(json!({"teamId": team_id})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["joinStatus"], "REQUESTED");
        assert_eq!(body["data"]["userId"], member_id);
        assert!(body["data"]["createdAt"].is_string());
        assert!(body["data"]["updatedAt"].is_string());
        let player_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = app
            .send(Method::POST, "/players", Some(&member), Some(json!({"teamId": team_id})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Pending members see nothing; the request is not counted
        let roster_uri = format!("/players?teamId={}", team_id);
        let (_, body) = app.send(Method::GET, &roster_uri, Some(&member), None).await;
        assert_eq!(body["data"], json!([]));
        let (_, body) = app.send(Method::GET, "/teams", Some(&member), None).await;
        assert_eq!(body["data"][0]["playerCount"], 1);

        // Own records are always visible
        let (_, body) = app.send(Method::GET, "/players", Some(&member), None).await;
        assert_eq!(body["data"][0]["id"], player_id);

        // Only the creator approves
        let player_uri = format!("/players/{}", player_id);
        let approve = json!({"joinStatus": "APPROVED"});
        let (status, _) = app
            .send(Method::PUT, &player_uri, Some(&member), Some(approve.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(Method::PUT, &player_uri, Some(&creator), Some(approve.clone()))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["joinStatus"], "APPROVED");

        let (status, _) = app
            .send(Method::PUT, &player_uri, Some(&creator), Some(approve))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send(
                Method::PUT,
                &player_uri,
                Some(&creator),
                Some(json!({"joinStatus": "REQUESTED"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Approved members see the roster
        let (_, body) = app.send(Method::GET, &roster_uri, Some(&member), None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        let (_, body) = app.send(Method::GET, "/teams", Some(&member), None).await;
        assert_eq!(body["data"][0]["playerCount"], 2);

        // Only the creator deletes the team
        let team_uri = format!("/teams/{}", team_id);
        let (status, _) = app.send(Method::DELETE, &team_uri, Some(&member), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Leaving shrinks the roster
        let (status, _) = app.send(Method::DELETE, &player_uri, Some(&member), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = app.send(Method::GET, &team_uri, Some(&creator), None).await;
        assert_eq!(body["data"]["playerCount"], 1);
        let (_, body) = app.send(Method::GET, &roster_uri, Some(&member), None).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_creator_cannot_leave_and_team_deletion_cascades() {
        let app = TestApp::new();
        let (_, creator) = app.register("bepro").await;
        let (_, member) = app.register("bepro2").await;
        let team_id = app.create_team(&creator, "Bepro FC").await;

        app.send(Method::POST, "/players", Some(&member), Some(json!({"teamId": team_id})))
            .await;

        let (_, body) = app.send(Method::GET, "/players", Some(&creator), None).await;
        let creator_player = body["data"][0]["id"].as_i64().unwrap();
        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("/players/{}", creator_player),
                Some(&creator),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["type"], "conflict_error");

        let team_uri = format!("/teams/{}", team_id);
        let (status, _) = app.send(Method::DELETE, &team_uri, Some(&creator), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.send(Method::GET, &team_uri, Some(&creator), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, body) = app.send(Method::GET, "/players", Some(&member), None).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_resources() {
        let app = TestApp::new();
        let (_, token) = app.register("bepro").await;

        let (status, _) = app
            .send(Method::POST, "/players", Some(&token), Some(json!({"teamId": 404})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.send(Method::GET, "/players?teamId=404", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, _) = app.send(Method::DELETE, "/players/404", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.send(Method::GET, "/teams/abc", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_id");

        let (status, _) = app
            .send(
                Method::PUT,
                "/players/1",
                Some(&token),
                Some(json!({"joinStatus": "MAYBE"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = app.send(Method::GET, "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);

        let (status, _) = app.send(Method::GET, "/live", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
