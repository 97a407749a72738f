//! State Store
//!
//! Owns the single `RobotState` and publishes every mutation on a tokio
//! broadcast channel. Mutations are published while the write lock is
//! held, and subscriptions are taken under the read lock, so a subscriber
//! sees each update exactly once and in mutation order.

use serde_json::{Map, Value};
use tokio::sync::{broadcast, RwLock};

use super::types::{now_ms, RobotState, UpdateKind};

/// Default capacity of the update channel
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// A published state change
#[derive(Debug, Clone)]
pub struct StateEvent {
    /// Subsystem that reported
    pub kind: UpdateKind,
    /// Publish time (ms since epoch)
    pub ts_ms: i64,
    /// Full state after the change
    pub state: RobotState,
    /// The report that caused the change
    pub payload: Value,
}

/// Shared robot state with change notifications
pub struct StateStore {
    state: RwLock<RobotState>,
    events: broadcast::Sender<StateEvent>,
}

impl StateStore {
    /// Create a store with a fresh state
    pub fn new(event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            state: RwLock::new(RobotState::new(now_ms())),
            events,
        }
    }

    /// Clone the current state
    pub async fn snapshot(&self) -> RobotState {
        self.state.read().await.clone()
    }

    /// Record a vision detection and publish the change
    pub async fn record_detection(&self, detection: Map<String, Value>) -> StateEvent {
        let payload = Value::Object(detection.clone());
        self.mutate(UpdateKind::Vision, payload, |state, now| {
            state.apply_detection(detection, now)
        })
        .await
    }

    /// Record an arm status report and publish the change
    pub async fn record_arm_status(&self, report: Map<String, Value>) -> StateEvent {
        let payload = Value::Object(report.clone());
        self.mutate(UpdateKind::Arm, payload, |state, now| {
            state.apply_arm_status(report, now)
        })
        .await
    }

    /// Current state plus a receiver for every later change
    pub async fn subscribe(&self) -> (RobotState, broadcast::Receiver<StateEvent>) {
        let state = self.state.read().await;
        (state.clone(), self.events.subscribe())
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    async fn mutate<F>(&self, kind: UpdateKind, payload: Value, apply: F) -> StateEvent
    where
        F: FnOnce(&mut RobotState, i64),
    {
        let mut state = self.state.write().await;
        let now = now_ms();
        apply(&mut state, now);

        let event = StateEvent {
            kind,
            ts_ms: now,
            state: state.clone(),
            payload,
        };

        // No receivers is fine: nobody is watching yet
        let delivered = self.events.send(event.clone()).unwrap_or(0);
        tracing::debug!(
            event = kind.event_type(),
            subscribers = delivered,
            total = state.counts.total,
            "State updated"
        );

        event
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
