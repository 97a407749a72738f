//! Data Transfer Objects
//!
//! Request helpers and response types for the API endpoints.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult};

/// Acknowledgement for accepted reports
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OkResponse {
    /// Always `true`
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" when the dashboard files are present
    pub web_root: String,
    /// Connected dashboards
    pub ws_clients: usize,
    /// Vision pipeline has reported
    pub vision_online: bool,
    /// Arm controller has reported
    pub arm_online: bool,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Read a report body as a JSON object
///
/// Unreadable, oversized or empty bodies are `bad body`; anything that is
/// not a JSON object is `invalid json`.
pub fn json_object(body: Result<Bytes, BytesRejection>) -> ApiResult<Map<String, Value>> {
    let bytes = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    if bytes.is_empty() {
        return Err(ApiError::BadBody("empty body".to_string()));
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::InvalidJson(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ApiError::InvalidJson(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
