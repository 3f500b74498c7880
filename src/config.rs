//! Configuration management for the auth gate
//!
//! All settings are startup configuration: the authenticator wiring is fixed
//! once at process start and never changed per request.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Gate configuration loaded once during initialization
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    /// Address the demo gate binds its control socket to
    pub bind_address: String,

    /// Base URL of the remote credential store (etcd endpoint)
    pub store_endpoint: String,

    /// Key of the user/hash map resource inside the store's
    /// configuration namespace
    pub credentials_key: String,

    /// Local file holding the same schema, read when the remote
    /// store is absent or unreachable
    pub fallback_path: String,

    /// Per-call bound on every store and file read
    pub store_timeout_secs: u64,

    /// Which authenticator to install: "basic" or "allowlist"
    pub authenticator: String,

    /// Client addresses accepted by the allowlist authenticator
    #[serde(default)]
    pub allowed_addresses: Vec<String>,

    /// Credential map cache TTL; 0 disables caching and every
    /// request resolves the source anew
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

impl GateConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // No separator: every field is a flat key, so AUTH_GATE_STORE_ENDPOINT
        // must map to store_endpoint rather than nest at the underscores.
        let settings = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("AUTH_GATE"))
            .build()?;

        let config: GateConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.store_endpoint.is_empty() {
            return Err(config::ConfigError::Message(
                "store_endpoint cannot be empty".into(),
            ));
        }

        if !self.credentials_key.starts_with('/') {
            return Err(config::ConfigError::Message(
                "credentials_key must be an absolute store path".into(),
            ));
        }

        if self.fallback_path.is_empty() {
            return Err(config::ConfigError::Message(
                "fallback_path cannot be empty".into(),
            ));
        }

        if self.store_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "store_timeout_secs must be greater than 0".into(),
            ));
        }

        match self.authenticator.as_str() {
            "basic" | "allowlist" => {}
            other => {
                return Err(config::ConfigError::Message(format!(
                    "Unknown authenticator kind: {}",
                    other
                )));
            }
        }

        for addr in &self.allowed_addresses {
            if addr.parse::<IpAddr>().is_err() {
                return Err(config::ConfigError::Message(format!(
                    "Invalid allowlist address: {}",
                    addr
                )));
            }
        }

        Ok(())
    }

    /// Get the per-call store timeout as Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Get the fallback file path as PathBuf
    pub fn fallback_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.fallback_path)
    }

    /// Get the allowlist as parsed addresses; call after validate()
    pub fn allowed_ips(&self) -> Vec<IpAddr> {
        self.allowed_addresses
            .iter()
            .filter_map(|a| a.parse().ok())
            .collect()
    }

    /// Get the cache TTL, or None when caching is disabled
    pub fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.cache_ttl_secs))
        }
    }
}
