//! TrashBot REST API
//!
//! HTTP API layer for the dashboard host, built with Axum.
//!
//! # Endpoints
//!
//! ## Reports
//! - `POST /vision/detection` - Detection from the vision pipeline
//! - `POST /arm/status` - Status from the arm controller
//!
//! ## State
//! - `GET /state` - Current robot state
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live state stream
//!
//! Any other path is served from the web root (the built dashboard).
//!
//! # Example
//!
//! ```rust,no_run
//! use trashbot::api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("127.0.0.1", 8080).web_root("./dashboard/dist");
//!     let state = AppState::new(config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/state", get(routes::state::get_state))
        .route(
            "/vision/detection",
            post(routes::vision::post_detection)
                .layer(DefaultBodyLimit::max(config.vision_body_limit)),
        )
        .route(
            "/arm/status",
            post(routes::arm::post_arm_status).layer(DefaultBodyLimit::max(config.arm_body_limit)),
        )
        .route("/ws", get(websocket_handler))
        .nest("/health", health_routes)
        .fallback_service(ServeDir::new(&config.web_root))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TrashBot dashboard listening on http://{}", addr);
    tracing::info!("  State: http://{}/state", addr);
    tracing::info!("  WS:    ws://{}/ws", addr);
    tracing::info!("  Web:   {:?}", config.web_root);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("TrashBot dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
