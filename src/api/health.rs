//! Health endpoints: `/health` and `/live` for liveness, `/ready` for storage reachability

use std::future::Future;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;
use crate::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            Self::Healthy => StatusCode::OK,
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Outcome of probing one repository
#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    /// Number of stored records, when the probe succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
}

impl HealthResponse {
    fn new(checks: Vec<ComponentCheck>, latency_ms: Option<u64>) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
            latency_ms,
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::new(Vec::new(), None)))
}

/// GET /ready - 503 when any repository cannot be read
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let checks = vec![
        probe("users", state.user_service.count()).await,
        probe("teams", async {
            state.team_service.list().await.map(|teams| teams.len())
        })
        .await,
    ];

    let response = HealthResponse::new(checks, Some(start.elapsed().as_millis() as u64));

    (response.status.status_code(), Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn probe(
    name: &'static str,
    count: impl Future<Output = Result<usize, DomainError>>,
) -> ComponentCheck {
    let start = Instant::now();
    let result = count.await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(records) => ComponentCheck {
            name,
            status: HealthStatus::Healthy,
            records: Some(records),
            error: None,
            latency_ms,
        },
        Err(e) => {
            tracing::warn!(component = name, error = %e, "Readiness probe failed");
            ComponentCheck {
                name,
                status: HealthStatus::Unhealthy,
                records: None,
                error: Some(e.to_string()),
                latency_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_failure_marks_response_unhealthy() {
        let ok = probe("users", async { Ok(3) }).await;
        assert_eq!(ok.status, HealthStatus::Healthy);
        assert_eq!(ok.records, Some(3));

        let failed = probe("teams", async {
            Err(DomainError::storage("connection refused"))
        })
        .await;
        assert_eq!(failed.status, HealthStatus::Unhealthy);
        assert!(failed.error.as_deref().unwrap().contains("connection refused"));

        let response = HealthResponse::new(vec![ok, failed], Some(4));
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.status.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_liveness_body_omits_checks() {
        let json = serde_json::to_value(HealthResponse::new(Vec::new(), None)).unwrap();

        assert_eq!(json["status"], "healthy");
        assert!(json.get("checks").is_none());
        assert!(json.get("latencyMs").is_none() && json.get("latency_ms").is_none());
    }
}
