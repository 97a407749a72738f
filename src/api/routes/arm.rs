//! Arm Routes
//!
//! - POST /arm/status - Report the arm controller status

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{json_object, OkResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /arm/status
///
/// Body is the status report; its `status` string (if any) becomes the
/// arm status, and `"error"` increments the error counter.
pub async fn post_arm_status(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<OkResponse>> {
    let report = json_object(body)?;
    let event = state.store.record_arm_status(report).await;

    tracing::info!(
        status = %event.state.arm.status,
        errors = event.state.counts.errors,
        "Arm status recorded"
    );

    Ok(Json(OkResponse::new()))
}
