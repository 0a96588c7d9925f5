//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use insight_core::DEFAULT_DASHBOARD_DETAIL_LIMIT;

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Address to bind
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// The single origin allowed by CORS
    pub cors_origin: String,

    /// Seed the demo dataset on startup
    pub seed_demo_data: bool,

    /// Max metrics / feedback entries returned per dashboard
    pub dashboard_detail_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            database_path: PathBuf::from("database/app.db"),
            db_max_connections: 5,
            cors_origin: "http://localhost:3000".to_string(),
            seed_demo_data: true,
            dashboard_detail_limit: DEFAULT_DASHBOARD_DETAIL_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `load` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),

            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data)?,

            dashboard_detail_limit: parse_or(
                &lookup,
                "DASHBOARD_DETAIL_LIMIT",
                defaults.dashboard_detail_limit,
            )?,
        };

        if config.dashboard_detail_limit == 0 {
            return Err(ConfigError::InvalidValue("DASHBOARD_DETAIL_LIMIT".to_string()));
        }

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("database/app.db"));
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.dashboard_detail_limit, 100);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "9000"),
            ("BIND_ADDR", "127.0.0.1"),
            ("DATABASE_PATH", "/tmp/insight.db"),
            ("SEED_DEMO_DATA", "false"),
            ("DASHBOARD_DETAIL_LIMIT", "25"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/insight.db"));
        assert!(!config.seed_demo_data);
        assert_eq!(config.dashboard_detail_limit, 25);
    }

    #[test]
    fn test_unparsable_value() {
        let err = config_from(&[("HTTP_PORT", "eighty")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("HTTP_PORT".to_string()));
    }

    #[test]
    fn test_zero_detail_limit_rejected() {
        let err = config_from(&[("DASHBOARD_DETAIL_LIMIT", "0")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("DASHBOARD_DETAIL_LIMIT".to_string()));
    }
}
