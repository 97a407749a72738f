//! WebSocket Connection Hub
//!
//! Tracks connected dashboards and enforces the connection limit. Fan-out
//! itself goes through the `StateStore` broadcast channel; the hub only
//! owns identity and bookkeeping.

use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::state::{now_ms, DEFAULT_EVENT_CAPACITY};

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
    /// Capacity of the state update channel
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 64,
            broadcast_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Bookkeeping for one connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Upgrade time (ms since epoch)
    pub connected_at_ms: i64,
}

/// Registry of active dashboard connections
pub struct ConnectionHub {
    connections: RwLock<HashMap<ConnectionId, ConnectionInfo>>,
    config: HubConfig,
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID on success, or an error if the connection
    /// limit has been reached.
    pub async fn register(&self) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(
            id.clone(),
            ConnectionInfo {
                connected_at_ms: now_ms(),
            },
        );

        tracing::info!(connection_id = %id, clients = connections.len(), "WebSocket connected");
        Ok(id)
    }

    /// Forget a connection
    pub async fn unregister(&self, id: &str) {
        let mut connections = self.connections.write().await;
        if let Some(info) = connections.remove(id) {
            tracing::info!(
                connection_id = %id,
                connected_for_ms = now_ms() - info.connected_at_ms,
                clients = connections.len(),
                "WebSocket disconnected"
            );
        }
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Look up a connection
    pub async fn connection(&self, id: &str) -> Option<ConnectionInfo> {
        self.connections.read().await.get(id).cloned()
    }
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),
}
