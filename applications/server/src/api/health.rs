/// Health check API routes
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

const SERVICE: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub version: String,
}

/// GET /health - static service identity; succeeds regardless of the store
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// GET /health/ready - probes the pool with a trivial query
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    match roster_storage::ping(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready".to_string(),
                service: SERVICE.to_string(),
                database: "connected".to_string(),
                error: None,
                timestamp: Utc::now().to_rfc3339(),
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "not ready".to_string(),
                service: SERVICE.to_string(),
                database: "disconnected".to_string(),
                error: Some(e.to_string()),
                timestamp: Utc::now().to_rfc3339(),
            }),
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct LiveResponse {
    pub status: String,
    pub service: String,
    pub pid: u32,
    pub uptime: f64,
    pub timestamp: String,
}

/// GET /health/live - process is running; never touches the store
pub async fn live(State(state): State<AppState>) -> Json<LiveResponse> {
    Json(LiveResponse {
        status: "alive".to_string(),
        service: SERVICE.to_string(),
        pid: std::process::id(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
