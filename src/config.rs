//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::websocket::HubConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,

    #[serde(default = "default_max_ws_clients")]
    pub max_ws_clients: usize,

    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_web_root() -> PathBuf {
    PathBuf::from("./dashboard/dist")
}

fn default_max_ws_clients() -> usize {
    64
}

fn default_broadcast_capacity() -> usize {
    crate::state::DEFAULT_EVENT_CAPACITY
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
            max_ws_clients: default_max_ws_clients(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

impl ServerConfig {
    /// HTTP layer settings
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.host.clone(), self.port).web_root(self.web_root.clone())
    }

    /// WebSocket hub settings
    pub fn hub_config(&self) -> HubConfig {
        HubConfig {
            max_connections: self.max_ws_clients,
            broadcast_capacity: self.broadcast_capacity,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("trashbot").join("config.toml")),
            Some(PathBuf::from("/etc/trashbot/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = lookup("TRASHBOT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TRASHBOT_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TRASHBOT_PORT: {}", port),
            }
        }
        if let Some(web_root) = lookup("TRASHBOT_WEB_ROOT") {
            self.server.web_root = PathBuf::from(web_root);
        }
        if let Some(max) = lookup("TRASHBOT_MAX_WS_CLIENTS") {
            match max.parse() {
                Ok(n) => self.server.max_ws_clients = n,
                Err(_) => tracing::warn!("Ignoring invalid TRASHBOT_MAX_WS_CLIENTS: {}", max),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("TRASHBOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TRASHBOT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# TrashBot Dashboard Configuration
#
# Environment variables override these settings:
# - TRASHBOT_HOST
# - TRASHBOT_PORT
# - TRASHBOT_WEB_ROOT
# - TRASHBOT_MAX_WS_CLIENTS
# - TRASHBOT_LOG_LEVEL
# - TRASHBOT_LOG_FORMAT

[server]
# Address to bind
host = "0.0.0.0"

# HTTP and WebSocket port
port = 8080

# Directory with the built dashboard (trunk build output)
web_root = "./dashboard/dist"

# Maximum concurrent dashboard connections
max_ws_clients = 64

# Updates buffered per slow client before it starts skipping
broadcast_capacity = 256

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
