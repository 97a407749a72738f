//! Vision Routes
//!
//! - POST /vision/detection - Report a classified item

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{json_object, OkResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /vision/detection
///
/// Body is the detection object (`label`, `recyclable`, `confidence`,
/// `location`), stored and relayed verbatim. Marks vision online and bumps
/// the counters.
pub async fn post_detection(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<OkResponse>> {
    let detection = json_object(body)?;

    let label = detection
        .get("label")
        .and_then(|v| v.as_str())
        .unwrap_or("-")
        .to_string();
    let event = state.store.record_detection(detection).await;

    tracing::info!(
        label = %label,
        total = event.state.counts.total,
        recyclable = event.state.counts.recyclable,
        trash = event.state.counts.trash,
        "Detection recorded"
    );

    Ok(Json(OkResponse::new()))
}
