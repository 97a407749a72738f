//! WebSocket Real-Time Streaming
//!
//! Pushes the robot state to dashboard clients via WebSocket.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and the connection limit
//! - **Handler**: Handles WebSocket upgrade and forwards state updates
//! - **Messages**: Defines the server message format
//!
//! ## Protocol
//!
//! Clients connect to `/ws`. The server immediately sends an `init`
//! message and then one `vision_update` or `arm_update` per state change.
//! Each message carries the full state; client frames are ignored.
//!
//! ```json
//! {"type": "vision_update", "ts_ms": 1700000000000, "state": {...}, "payload": {...}}
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, ConnectionInfo, HubConfig, HubError};
pub use messages::ServerMessage;
