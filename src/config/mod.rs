//! Configuration loading and management
//!
//! Settings come from an optional YAML file named by `RESTAURANT_CONFIG`,
//! then a handful of environment variables override single values. Every
//! field has a default, so an empty file (or none at all) starts the service
//! on the in-memory store.

use crate::core::auth::JwtSettings;
use crate::storage::StoreTimeouts;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Variable naming the YAML configuration file
pub const CONFIG_PATH_VAR: &str = "RESTAURANT_CONFIG";

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub timeouts: TimeoutConfig,
    pub pagination: PaginationConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which [`DocumentStore`](crate::storage::DocumentStore) to run on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    InMemory,
    Mongodb,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "memory" => Ok(Self::InMemory),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            other => anyhow::bail!("unknown store backend '{}'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "restaurant".to_string(),
        }
    }
}

/// Store deadlines, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub read_secs: u64,
    pub write_secs: u64,
    pub order_insert_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_secs: 30,
            write_secs: 30,
            order_insert_secs: 5,
        }
    }
}

impl TimeoutConfig {
    pub fn to_store_timeouts(&self) -> StoreTimeouts {
        StoreTimeouts {
            read: Duration::from_secs(self.read_secs),
            write: Duration::from_secs(self.write_secs),
            order_insert: Duration::from_secs(self.order_insert_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub access_token_minutes: i64,
    pub refresh_token_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "restaurant".to_string(),
            access_token_minutes: 30,
            refresh_token_hours: 24,
        }
    }
}

impl AuthConfig {
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.secret.clone(),
            issuer: self.issuer.clone(),
            access_token_minutes: self.access_token_minutes,
            refresh_token_hours: self.refresh_token_hours,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `RESTAURANT_CONFIG` (when set) and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PORT`, `MONGODB_URL`, `SECRET_KEY` and `STORE_BACKEND`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
        }
        if let Some(uri) = lookup("MONGODB_URL") {
            self.store.uri = uri;
        }
        if let Some(secret) = lookup("SECRET_KEY") {
            self.auth.secret = secret;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.address(), "0.0.0.0:8000");
        assert_eq!(config.store.backend, StoreBackend::InMemory);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(
            config.timeouts.to_store_timeouts(),
            StoreTimeouts::default()
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9000
store:
  backend: mongodb
timeouts:
  order_insert_secs: 2
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.backend, StoreBackend::Mongodb);
        assert_eq!(config.store.database, "restaurant");
        assert_eq!(config.timeouts.order_insert_secs, 2);
        assert_eq!(config.timeouts.read_secs, 30);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth:\n  secret: s3cret\n  access_token_minutes: 5").unwrap();

        let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.auth.access_token_minutes, 5);
        assert_eq!(config.auth.refresh_token_hours, 24);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::from_yaml_file("/nonexistent/restaurant.yaml").is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8081"),
            ("MONGODB_URL", "mongodb://db:27017"),
            ("SECRET_KEY", "k"),
            ("STORE_BACKEND", "MongoDB"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.store.uri, "mongodb://db:27017");
        assert_eq!(config.auth.secret, "k");
        assert_eq!(config.store.backend, StoreBackend::Mongodb);
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(|k| (k == "PORT").then(|| "http".to_string())).is_err());
        assert!(
            config
                .apply_overrides(|k| (k == "STORE_BACKEND").then(|| "redis".to_string()))
                .is_err()
        );
    }
}
