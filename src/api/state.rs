//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::state::StateStore;
use crate::websocket::{ConnectionHub, HubConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The robot state every dashboard mirrors
    pub store: Arc<StateStore>,
    /// WebSocket connection registry
    pub hub: Arc<ConnectionHub>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the default hub configuration
    pub fn new(config: ApiConfig) -> Self {
        Self::with_ws_config(config, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(config: ApiConfig, hub_config: HubConfig) -> Self {
        Self {
            store: Arc::new(StateStore::new(hub_config.broadcast_capacity)),
            hub: Arc::new(ConnectionHub::new(hub_config)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.hub.connection_count().await
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory with the built dashboard
    pub web_root: PathBuf,
    /// Maximum body size for `POST /vision/detection`
    pub vision_body_limit: usize,
    /// Maximum body size for `POST /arm/status`
    pub arm_body_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            web_root: PathBuf::from("./dashboard/dist"),
            vision_body_limit: 4 * 1024,
            arm_body_limit: 2 * 1024,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Builder method: set the static web root
    pub fn web_root(mut self, web_root: impl Into<PathBuf>) -> Self {
        self.web_root = web_root.into();
        self
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_addr() {
        let config = ApiConfig::new("127.0.0.1", 9000);
        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.vision_body_limit, 4096);
        assert_eq!(config.arm_body_limit, 2048);
    }

    #[tokio::test]
    async fn test_app_state_starts_empty() {
        let state = AppState::new(ApiConfig::default().web_root("/tmp/web"));
        assert_eq!(state.ws_connection_count().await, 0);
        assert_eq!(state.store.snapshot().await.counts.total, 0);
        assert_eq!(state.config.web_root, PathBuf::from("/tmp/web"));
    }
}
