//! Server configuration loaded from TOML.
//!
//! Every section is optional; missing values fall back to defaults. Semantic
//! checks run after parsing and report all problems at once.

use std::{fs, net::SocketAddr, path::Path, time::Duration};

use saferoute_core::ScorerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub scoring: ScorerConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub body_limit_bytes: usize,
    /// Maximum number of requests accepted by the batch endpoint
    pub max_batch_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            max_concurrent_requests: 256,
            body_limit_bytes: 1024 * 1024,
            max_batch_size: 100,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// # Errors
    ///
    /// Returns an error if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: 10_000,
        }
    }
}

/// Loads and validates configuration, using defaults when `path` is `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            parse_config(&content)?
        }
        None => ServerConfig::default(),
    };

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Returns every problem found, not just the first
///
/// # Errors
///
/// Returns the list of validation messages if any check fails.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let http = &config.server;

    if let Err(e) = http.socket_addr() {
        errors.push(format!("server.host {:?} is invalid: {e}", http.host));
    }
    if http.request_timeout_secs == 0 {
        errors.push("server.request_timeout_secs must be greater than 0".to_string());
    }
    if http.max_concurrent_requests == 0 {
        errors.push("server.max_concurrent_requests must be greater than 0".to_string());
    }
    if http.body_limit_bytes == 0 {
        errors.push("server.body_limit_bytes must be greater than 0".to_string());
    }
    if http.max_batch_size == 0 {
        errors.push("server.max_batch_size must be greater than 0".to_string());
    }
    if let Err(e) = config.scoring.validate() {
        errors.push(format!("scoring: {e}"));
    }
    if config.cache.enabled && config.cache.capacity == 0 {
        errors.push("cache.capacity must be greater than 0 when the cache is enabled".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
