use crate::actors::{query_cache, QueryCacheStats};
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub current_user: String,
    pub checks: HealthChecks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<QueryCacheStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub query_cache: CheckResult,
}

/// Result of an individual check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe response (the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .route("/readyz", get(readiness_check))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (query_cache_check, cache) = match query_cache::cache_stats(&state.cache).await {
        Ok(stats) => (
            CheckResult {
                status: HealthStatus::Healthy,
                message: None,
            },
            Some(stats),
        ),
        Err(e) => {
            error!(error = %e, "Query cache health check failed");
            (
                CheckResult {
                    status: HealthStatus::Unhealthy,
                    message: Some(e.to_string()),
                },
                None,
            )
        }
    };

    let status = query_cache_check.status.clone();
    let response = HealthResponse {
        status: status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        current_user: state.current_user(),
        checks: HealthChecks {
            query_cache: query_cache_check,
        },
        cache,
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

/// Ready once the query cache answers
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match query_cache::cache_stats(&state.cache).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                message: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                ready: false,
                message: Some(format!("Not ready - query cache: {}", e)),
            }),
        ),
    }
}
