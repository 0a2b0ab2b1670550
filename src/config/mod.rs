//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::offline::{DEFAULT_ASSETS, DEFAULT_CACHE_NAME};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` as accepted by `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Event bus settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity; slow subscribers beyond it are lagged
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Whether the stores start from the hard-coded seed records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Offline asset cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    pub enabled: bool,
    pub cache_name: String,
    pub assets: Vec<String>,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Complete application configuration
///
/// Every section is optional in YAML; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub events: EventsConfig,
    pub seed: SeedConfig,
    pub offline: OfflineConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path, "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Override listener settings, typically from CLI flags
    pub fn with_listener(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.events.capacity, 1024);
        assert!(config.seed.enabled);
        assert!(!config.offline.enabled);
        assert_eq!(config.offline.cache_name, "suitcut-cache-v2");
        assert_eq!(config.offline.assets.len(), 5);
    }

    #[test]
    fn test_from_yaml_str_partial() {
        let yaml = r#"
server:
  port: 8080
seed:
  enabled: false
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(!config.seed.enabled);
        assert_eq!(config.events, EventsConfig::default());
    }

    #[test]
    fn test_from_yaml_str_empty_document() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_yaml_str_rejects_bad_types() {
        let result = AppConfig::from_yaml_str("server:\n  port: not-a-port\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_listener_overrides() {
        let config = AppConfig::default().with_listener(Some("0.0.0.0".into()), None);
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");

        let config = config.with_listener(None, Some(9000));
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
    }
}
