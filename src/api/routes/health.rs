//! Health Routes
//!
//! Health check endpoints for monitoring and probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// The API has no external dependencies, so it is ready once it is serving.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    // Taking the read lock proves no writer is wedged
    let _ = state.store.snapshot().await;
    StatusCode::OK
}

/// GET /health
///
/// Full health status with component details. A missing web root only
/// degrades the service: ingest and WebSocket still work.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let web_root_ok = state.config.web_root.is_dir();
    let snapshot = state.store.snapshot().await;

    Json(HealthResponse {
        status: if web_root_ok { "healthy" } else { "degraded" }.to_string(),
        web_root: if web_root_ok { "ok" } else { "missing" }.to_string(),
        ws_clients: state.ws_connection_count().await,
        vision_online: snapshot.vision.online,
        arm_online: snapshot.arm.online,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
