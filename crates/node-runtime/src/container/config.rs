//! # Runtime Configuration
//!
//! Unified configuration for the collaborators and runtime parameters.
//!
//! Every value has a default and can be overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PC_CONSENT_SERVICE` | `services.consent_service` |
//! | `PC_PARTITION_PREFIX` | `services.partition_prefix` |
//! | `PC_CALL_TIMEOUT_MS` | `services.call_timeout_ms` |
//! | `PC_STATE_FILE` | `storage.state_file` |
//! | `PC_LOG_LEVEL` | `logging.level` |

use pc_02_consent_oracle::DEFAULT_CONSENT_SERVICE;
use pc_03_partitioned_records::DEFAULT_PARTITION_PREFIX;
use shared_bus::DEFAULT_CALL_TIMEOUT_MS;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Collaborator service configuration.
    pub services: ServicesConfig,
    /// World state configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable values are ignored with a
    /// warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("PC_CONSENT_SERVICE") {
            config.services.consent_service = name;
        }
        if let Some(prefix) = lookup("PC_PARTITION_PREFIX") {
            config.services.partition_prefix = prefix;
        }
        if let Some(timeout) = lookup("PC_CALL_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => config.services.call_timeout_ms = ms,
                Err(_) => warn!(value = %timeout, "PC_CALL_TIMEOUT_MS is not a number; keeping default"),
            }
        }
        if let Some(path) = lookup("PC_STATE_FILE") {
            config.storage.state_file = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        if let Some(level) = lookup("PC_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }

    /// Validate the configuration before wiring the runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.services.consent_service.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName("consent_service"));
        }
        if self.services.partition_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName("partition_prefix"));
        }
        if self.services.call_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A service name (or name prefix) is empty.
    #[error("Service name `{0}` must not be empty")]
    EmptyServiceName(&'static str),

    /// Cross-service calls would time out immediately.
    #[error("call_timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Collaborator service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesConfig {
    /// Name of the consent authority service.
    pub consent_service: String,
    /// Prefix of per-organization partition service names.
    pub partition_prefix: String,
    /// Timeout applied to every cross-service call.
    pub call_timeout_ms: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            consent_service: DEFAULT_CONSENT_SERVICE.to_string(),
            partition_prefix: DEFAULT_PARTITION_PREFIX.to_string(),
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

/// World state configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Snapshot file of a file-backed world state. `None` keeps the world
    /// state in memory.
    pub state_file: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.services.consent_service, "consentcc");
        assert_eq!(config.services.partition_prefix, "privatecc");
        assert_eq!(config.services.call_timeout_ms, 30_000);
        assert_eq!(config.storage.state_file, None);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("PC_CONSENT_SERVICE", "consent-v2"),
            ("PC_PARTITION_PREFIX", "vault-"),
            ("PC_CALL_TIMEOUT_MS", "1500"),
            ("PC_STATE_FILE", "/tmp/world.bin"),
            ("PC_LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.services.consent_service, "consent-v2");
        assert_eq!(config.services.partition_prefix, "vault-");
        assert_eq!(config.services.call_timeout_ms, 1500);
        assert_eq!(config.storage.state_file, Some(PathBuf::from("/tmp/world.bin")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let config = RuntimeConfig::from_lookup(lookup(&[("PC_CALL_TIMEOUT_MS", "soon")]));
        assert_eq!(config.services.call_timeout_ms, 30_000);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = RuntimeConfig::default();
        config.services.call_timeout_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let mut config = RuntimeConfig::default();
        config.services.consent_service = " ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyServiceName("consent_service"))
        );
    }
}
