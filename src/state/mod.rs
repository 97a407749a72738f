//! Robot State
//!
//! The single source of truth the dashboards render:
//!
//! - **types**: `RobotState` and its parts, plus the mutation rules
//! - **store**: `StateStore`, the locked state with change notifications
//!
//! # Update Path
//!
//! ```text
//!   POST /vision/detection ─┐
//!                           ├→ StateStore (write lock) → broadcast → WebSocket clients
//!   POST /arm/status ───────┘
//! ```

pub mod store;
pub mod types;

pub use store::{StateEvent, StateStore, DEFAULT_EVENT_CAPACITY};
pub use types::{now_ms, ArmState, Counts, RobotState, UpdateKind, VisionState};
