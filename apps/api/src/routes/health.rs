//! Health check HTTP route handlers
//!
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/live` - Kubernetes-style liveness probe
//! - `GET /health/ready` - Readiness check (pings the store)

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::store::Store;

/// Shared state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<dyn Store>,
}

impl HealthState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Status of a checked dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Readiness probe response body
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: ServiceStatus,
    pub store: ServiceStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub version: &'static str,
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe
///
/// Does not check the store; that's what readiness is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe
///
/// # Response
/// - 200 OK if the store answers a ping
/// - 503 Service Unavailable otherwise
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let started = Instant::now();
    let result = state.store.ping().await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    let (status, error) = match result {
        Ok(()) => (ServiceStatus::Healthy, None),
        Err(e) => {
            tracing::warn!(error = %e, "Store readiness check failed");
            (ServiceStatus::Unhealthy, Some(e.to_string()))
        }
    };

    let status_code = match status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let body = ReadinessResponse {
        status,
        store: status,
        response_time_ms,
        error,
        version: env!("CARGO_PKG_VERSION"),
    };

    (status_code, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health() {
        let response = simple_health().await;
        assert_eq!(response, "OK");
    }

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
