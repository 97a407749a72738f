//! # TrashBot Dashboard
//!
//! Live state hub for the TrashBot sorting robot. The vision pipeline and
//! the arm controller report over HTTP; every open dashboard receives the
//! combined state over a WebSocket and repaints from each message.
//!
//! ## Modules
//!
//! - [`state`]: The robot state and its update rules
//! - [`websocket`]: WebSocket fan-out to dashboards
//! - [`api`]: REST API and static file server with Axum
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trashbot::state::StateStore;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = StateStore::default();
//!     let (_initial, mut updates) = store.subscribe().await;
//!
//!     let detection = json!({"label": "can", "recyclable": true});
//!     if let serde_json::Value::Object(map) = detection {
//!         store.record_detection(map).await;
//!     }
//!
//!     let event = updates.recv().await.unwrap();
//!     println!("{} items sorted", event.state.counts.total);
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod state;
pub mod websocket;

pub use state::{ArmState, Counts, RobotState, StateEvent, StateStore, UpdateKind, VisionState};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{websocket_handler, ConnectionHub, HubConfig, HubError, ServerMessage};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
