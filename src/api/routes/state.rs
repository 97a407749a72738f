//! State Routes
//!
//! - GET /state - Current robot state

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::state::RobotState;

/// GET /state
///
/// The same snapshot dashboards receive over the WebSocket.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<RobotState> {
    Json(state.store.snapshot().await)
}
