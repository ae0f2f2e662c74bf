//! Configuration management for the todo board server.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use todo_board::DEFAULT_MAX_TITLE_LEN;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Todo store configuration
    pub store: StoreSettings,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: IpAddr,
    /// Port to bind to
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// How long in-flight requests get to finish on shutdown
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Address to bind the listener to
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Todo store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// JSON seed file; the bundled sample seed is used when unset
    pub seed_path: Option<PathBuf>,
    /// Maximum todo title length in characters
    pub max_title_len: usize,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig {
                host: parse_or(&lookup, "TODO_HOST", IpAddr::from([127, 0, 0, 1]))?,
                port: parse_or(&lookup, "TODO_PORT", 3000)?,
                log_level: lookup("TODO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                shutdown_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "TODO_SHUTDOWN_TIMEOUT_SECS",
                    5,
                )?),
            },
            store: StoreSettings {
                seed_path: lookup("TODO_SEED_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
                max_title_len: parse_or(&lookup, "TODO_MAX_TITLE_LEN", DEFAULT_MAX_TITLE_LEN)?,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        // No variables set: every field takes its default, which always parses.
        Self {
            server: ServerConfig {
                host: IpAddr::from([127, 0, 0, 1]),
                port: 3000,
                log_level: "info".to_string(),
                shutdown_timeout: Duration::from_secs(5),
            },
            store: StoreSettings {
                seed_path: None,
                max_title_len: DEFAULT_MAX_TITLE_LEN,
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_HOST", "0.0.0.0"),
            ("TODO_PORT", "8080"),
            ("TODO_SEED_PATH", "/srv/todos.json"),
            ("TODO_MAX_TITLE_LEN", "40"),
            ("TODO_LOG_LEVEL", "debug"),
            ("TODO_SHUTDOWN_TIMEOUT_SECS", "1"),
        ]))
        .unwrap();

        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.shutdown_timeout, Duration::from_secs(1));
        assert_eq!(config.store.seed_path, Some(PathBuf::from("/srv/todos.json")));
        assert_eq!(config.store.max_title_len, 40);
    }

    #[test]
    fn test_blank_seed_path_is_unset() {
        let config = Config::from_lookup(lookup(&[("TODO_SEED_PATH", "  ")])).unwrap();
        assert_eq!(config.store.seed_path, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("TODO_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TODO_PORT", .. }));
        assert!(err.to_string().starts_with("Invalid value for TODO_PORT: \"eighty\""));
    }
}
