//! Agent configuration
//!
//! Resolved from `OUTPUT_CONTRACTS_*` environment variables, then overridden
//! by CLI flags.

use std::path::PathBuf;

use crate::telemetry::DEFAULT_EVENT_CAPACITY;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct ContractsConfig {
    /// Extra definitions registered after the built-in catalog
    pub definitions_path: Option<PathBuf>,

    /// Register the built-in catalog at start
    pub seed_builtins: bool,

    /// Record validation events
    pub record_events: bool,

    /// Maximum number of events kept in memory
    pub event_capacity: usize,

    /// Enable Prometheus metrics
    pub enable_metrics: bool,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            definitions_path: None,
            seed_builtins: true,
            record_events: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            enable_metrics: true,
            log_json: false,
        }
    }
}

impl ContractsConfig {
    /// Create a new config builder
    pub fn builder() -> ContractsConfigBuilder {
        ContractsConfigBuilder::new()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v.parse().unwrap_or(default))
                .unwrap_or(default)
        };

        Self {
            definitions_path: lookup("OUTPUT_CONTRACTS_DEFINITIONS")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            seed_builtins: flag("OUTPUT_CONTRACTS_SEED_BUILTINS", defaults.seed_builtins),
            record_events: flag("OUTPUT_CONTRACTS_RECORD_EVENTS", defaults.record_events),
            event_capacity: lookup("OUTPUT_CONTRACTS_EVENT_CAPACITY")
                .map(|v| v.parse().unwrap_or(defaults.event_capacity))
                .unwrap_or(defaults.event_capacity),
            enable_metrics: flag("OUTPUT_CONTRACTS_ENABLE_METRICS", defaults.enable_metrics),
            log_json: flag("OUTPUT_CONTRACTS_LOG_JSON", defaults.log_json),
        }
    }
}

/// Builder for ContractsConfig
pub struct ContractsConfigBuilder {
    config: ContractsConfig,
}

impl ContractsConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: ContractsConfig::default(),
        }
    }

    /// Load extra definitions from a file
    pub fn definitions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.definitions_path = Some(path.into());
        self
    }

    pub fn seed_builtins(mut self, enabled: bool) -> Self {
        self.config.seed_builtins = enabled;
        self
    }

    pub fn record_events(mut self, enabled: bool) -> Self {
        self.config.record_events = enabled;
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity;
        self
    }

    pub fn enable_metrics(mut self, enabled: bool) -> Self {
        self.config.enable_metrics = enabled;
        self
    }

    pub fn log_json(mut self, enabled: bool) -> Self {
        self.config.log_json = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContractsConfig {
        self.config
    }
}

impl Default for ContractsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ContractsConfig::default();
        assert!(config.definitions_path.is_none());
        assert!(config.seed_builtins);
        assert!(config.record_events);
        assert!(config.enable_metrics);
        assert!(!config.log_json);
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_config_builder() {
        let config = ContractsConfig::builder()
            .definitions_path("extra.yaml")
            .seed_builtins(false)
            .record_events(false)
            .event_capacity(10)
            .enable_metrics(false)
            .log_json(true)
            .build();

        assert_eq!(config.definitions_path, Some(PathBuf::from("extra.yaml")));
        assert!(!config.seed_builtins);
        assert!(!config.record_events);
        assert_eq!(config.event_capacity, 10);
        assert!(!config.enable_metrics);
        assert!(config.log_json);
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("OUTPUT_CONTRACTS_DEFINITIONS", "/etc/contracts.json"),
            ("OUTPUT_CONTRACTS_SEED_BUILTINS", "false"),
            ("OUTPUT_CONTRACTS_EVENT_CAPACITY", "not-a-number"),
            ("OUTPUT_CONTRACTS_LOG_JSON", "true"),
        ]
        .into_iter()
        .collect();

        let config = ContractsConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.definitions_path,
            Some(PathBuf::from("/etc/contracts.json"))
        );
        assert!(!config.seed_builtins);
        assert!(config.record_events);
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
        assert!(config.log_json);
    }
}
