//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::Path;

const DEFAULT_DATABASE_URL: &str = "sqlite:holocron.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings. Every field has a default except the CORS origins,
/// which disable the CORS layer when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Option<String>,
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server_port = match non_empty("SERVER_PORT").or_else(|| non_empty("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            server_port,
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS"),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server_host, self.server_port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_HOST",
            value: raw,
        })
    }
}

/// Loads `.env.local` then `.env` from `root`, if present.
///
/// Values already in the environment are never overridden.
pub fn load_dotenv(root: &Path) {
    for filename in [".env.local", ".env"] {
        let path = root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cors_allowed_origins, None);
        assert_eq!(
            config.socket_addr().expect("addr").to_string(),
            "0.0.0.0:3000"
        );
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "8080")])).expect("config");
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "lots")]))
            .expect_err("invalid port");
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn blank_cors_origins_disable_cors() {
        let config =
            AppConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "  ")])).expect("config");
        assert_eq!(config.cors_allowed_origins, None);
    }
}
