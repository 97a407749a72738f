//! Core data types for the robot state
//!
//! This module defines the shared state every dashboard mirrors:
//! - `RobotState`: The whole snapshot broadcast to clients
//! - `VisionState` / `ArmState`: Per-subsystem liveness and latest report
//! - `Counts`: Cumulative sorting counters
//! - `UpdateKind`: Which subsystem caused a state change

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The complete robot state as seen by dashboards
///
/// Serialized verbatim into every WebSocket message and the `GET /state`
/// response. Absent values serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RobotState {
    /// Time of the last mutation (ms since epoch)
    pub last_update_ms: i64,
    /// Vision subsystem
    pub vision: VisionState,
    /// Arm subsystem
    pub arm: ArmState,
    /// Cumulative counters
    pub counts: Counts,
}

impl RobotState {
    /// Fresh state: everything offline, nothing counted
    pub fn new(now_ms: i64) -> Self {
        Self {
            last_update_ms: now_ms,
            vision: VisionState::default(),
            arm: ArmState::default(),
            counts: Counts::default(),
        }
    }

    /// Apply a detection reported by the vision pipeline
    pub fn apply_detection(&mut self, detection: Map<String, Value>, now_ms: i64) {
        self.last_update_ms = now_ms;

        let recyclable = matches!(detection.get("recyclable"), Some(Value::Bool(true)));

        self.vision.online = true;
        self.vision.last_seen_ms = Some(now_ms);
        self.vision.latest = Some(Value::Object(detection));

        self.counts.total = self.counts.total.saturating_add(1);
        if recyclable {
            self.counts.recyclable = self.counts.recyclable.saturating_add(1);
        } else {
            self.counts.trash = self.counts.trash.saturating_add(1);
        }
    }

    /// Apply a status report from the arm controller
    ///
    /// The status string is only replaced when the report carries a string
    /// `status`; a status of exactly `"error"` bumps the error counter.
    pub fn apply_arm_status(&mut self, report: Map<String, Value>, now_ms: i64) {
        self.last_update_ms = now_ms;

        self.arm.online = true;
        self.arm.last_seen_ms = Some(now_ms);

        let status = report.get("status").and_then(Value::as_str).map(str::to_owned);
        if let Some(status) = &status {
            self.arm.status = status.clone();
        }
        self.arm.latest = Some(Value::Object(report));

        if status.as_deref() == Some(ARM_STATUS_ERROR) {
            self.counts.errors = self.counts.errors.saturating_add(1);
        }
    }
}

/// Arm status that counts as a failure
pub const ARM_STATUS_ERROR: &str = "error";

/// Arm status before the controller has reported
pub const ARM_STATUS_UNKNOWN: &str = "unknown";

/// Vision subsystem state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisionState {
    /// Whether the pipeline has reported since startup
    pub online: bool,
    /// Time of the last report
    pub last_seen_ms: Option<i64>,
    /// Last detection, relayed as received
    pub latest: Option<Value>,
}

/// Arm subsystem state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArmState {
    /// Whether the controller has reported since startup
    pub online: bool,
    /// Time of the last report
    pub last_seen_ms: Option<i64>,
    /// Last known status string
    pub status: String,
    /// Last status report, relayed as received
    pub latest: Option<Value>,
}

impl Default for ArmState {
    fn default() -> Self {
        Self {
            online: false,
            last_seen_ms: None,
            status: ARM_STATUS_UNKNOWN.to_string(),
            latest: None,
        }
    }
}

/// Cumulative sorting counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counts {
    pub total: u64,
    pub recyclable: u64,
    pub trash: u64,
    pub errors: u64,
}

/// Which report produced a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Vision,
    Arm,
}

impl UpdateKind {
    /// Event name used on the wire
    pub fn event_type(&self) -> &'static str {
        match self {
            UpdateKind::Vision => "vision_update",
            UpdateKind::Arm => "arm_update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_initial_state_serializes_with_nulls() {
        let state = RobotState::new(1_700_000_000_000);
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["last_update_ms"], json!(1_700_000_000_000i64));
        assert_eq!(value["vision"]["online"], json!(false));
        assert!(value["vision"]["last_seen_ms"].is_null());
        assert!(value["vision"]["latest"].is_null());
        assert_eq!(value["arm"]["status"], json!("unknown"));
        assert!(value["arm"]["latest"].is_null());
        assert_eq!(value["counts"], json!({"total": 0, "recyclable": 0, "trash": 0, "errors": 0}));
    }

    #[test]
    fn test_recyclable_detection() {
        let mut state = RobotState::new(0);
        state.apply_detection(object(json!({"label": "can", "recyclable": true})), 42);

        assert_eq!(state.last_update_ms, 42);
        assert!(state.vision.online);
        assert_eq!(state.vision.last_seen_ms, Some(42));
        assert_eq!(state.vision.latest, Some(json!({"label": "can", "recyclable": true})));
        assert_eq!(state.counts.total, 1);
        assert_eq!(state.counts.recyclable, 1);
        assert_eq!(state.counts.trash, 0);
    }

    #[test]
    fn test_non_boolean_recyclable_counts_as_trash() {
        let mut state = RobotState::new(0);
        state.apply_detection(object(json!({"label": "peel"})), 1);
        state.apply_detection(object(json!({"recyclable": "true"})), 2);
        state.apply_detection(object(json!({"recyclable": false})), 3);

        assert_eq!(state.counts.total, 3);
        assert_eq!(state.counts.recyclable, 0);
        assert_eq!(state.counts.trash, 3);
    }

    #[test]
    fn test_arm_error_status() {
        let mut state = RobotState::new(0);
        state.apply_arm_status(object(json!({"status": "error", "code": 7})), 10);

        assert!(state.arm.online);
        assert_eq!(state.arm.status, "error");
        assert_eq!(state.arm.latest, Some(json!({"status": "error", "code": 7})));
        assert_eq!(state.counts.errors, 1);
    }

    #[test]
    fn test_arm_report_without_status_keeps_previous() {
        let mut state = RobotState::new(0);
        state.apply_arm_status(object(json!({"status": "picking"})), 1);
        state.apply_arm_status(object(json!({"status": 3})), 2);

        assert_eq!(state.arm.status, "picking");
        assert_eq!(state.arm.last_seen_ms, Some(2));
        assert_eq!(state.counts.errors, 0);
    }

    #[test]
    fn test_counters_saturate() {
        let mut state = RobotState::new(0);
        state.counts.total = u64::MAX;
        state.apply_detection(Map::new(), 1);
        assert_eq!(state.counts.total, u64::MAX);
    }

    #[test]
    fn test_update_kind_event_type() {
        assert_eq!(UpdateKind::Vision.event_type(), "vision_update");
        assert_eq!(UpdateKind::Arm.event_type(), "arm_update");
    }
}
