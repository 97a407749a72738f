//! WebSocket Message Types
//!
//! Defines the messages pushed from the server to dashboards. Every
//! state-bearing message carries the full `RobotState`, so a client can
//! repaint from any single message.

use serde::Serialize;
use serde_json::Value;

use crate::state::{RobotState, StateEvent, UpdateKind};

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Initial snapshot, sent once right after the upgrade
    Init {
        /// Send time in milliseconds
        ts_ms: i64,
        /// Current state
        state: RobotState,
    },
    /// The vision pipeline reported a detection
    VisionUpdate {
        ts_ms: i64,
        state: RobotState,
        /// The detection as received
        payload: Value,
    },
    /// The arm controller reported a status
    ArmUpdate {
        ts_ms: i64,
        state: RobotState,
        /// The status report as received
        payload: Value,
    },
    /// Error message (sent before the server closes a connection)
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Build the initial snapshot message
    pub fn init(ts_ms: i64, state: RobotState) -> Self {
        ServerMessage::Init { ts_ms, state }
    }
}

impl From<StateEvent> for ServerMessage {
    fn from(event: StateEvent) -> Self {
        let StateEvent {
            kind,
            ts_ms,
            state,
            payload,
        } = event;

        match kind {
            UpdateKind::Vision => ServerMessage::VisionUpdate {
                ts_ms,
                state,
                payload,
            },
            UpdateKind::Arm => ServerMessage::ArmUpdate {
                ts_ms,
                state,
                payload,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_init_serialize() {
        let msg = ServerMessage::init(1699000000000, RobotState::new(1699000000000));
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["type"], json!("init"));
        assert_eq!(value["ts_ms"], json!(1699000000000i64));
        assert_eq!(value["state"]["counts"]["total"], json!(0));
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn test_vision_update_from_event() {
        let mut state = RobotState::new(0);
        state.counts.total = 5;

        let event = StateEvent {
            kind: UpdateKind::Vision,
            ts_ms: 17,
            state,
            payload: json!({"label": "bottle"}),
        };
        let value = serde_json::to_value(ServerMessage::from(event)).unwrap();

        assert_eq!(value["type"], json!("vision_update"));
        assert_eq!(value["ts_ms"], json!(17));
        assert_eq!(value["state"]["counts"]["total"], json!(5));
        assert_eq!(value["payload"]["label"], json!("bottle"));
    }

    #[test]
    fn test_arm_update_from_event() {
        let event = StateEvent {
            kind: UpdateKind::Arm,
            ts_ms: 3,
            state: RobotState::new(0),
            payload: json!({"status": "idle"}),
        };
        let json = serde_json::to_string(&ServerMessage::from(event)).unwrap();

        assert!(json.contains("\"type\":\"arm_update\""));
        assert!(json.contains("\"payload\":{\"status\":\"idle\"}"));
    }

    #[test]
    fn test_error_serialize() {
        let msg = ServerMessage::Error {
            message: "full".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"full"}"#);
    }
}
