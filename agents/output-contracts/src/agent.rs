//! Composition root
//!
//! Builds the single registry instance and wires it to the validator and
//! telemetry according to [`ContractsConfig`].

use std::sync::Arc;

use crate::config::ContractsConfig;
use crate::error::Result;
use crate::loader::load_definitions_file;
use crate::registry::SchemaRegistry;
use crate::telemetry::{EventRecorder, ValidationMetricsRegistry};
use crate::validation::ContractValidator;

/// Owns the registry, validator and telemetry of one process
pub struct OutputContractsAgent {
    validator: ContractValidator,
    metrics: Option<ValidationMetricsRegistry>,
}

impl OutputContractsAgent {
    /// Build the agent: seed built-ins, load extra definitions, attach telemetry
    pub fn from_config(config: &ContractsConfig) -> Result<Self> {
        let registry = Arc::new(SchemaRegistry::new());
        if config.seed_builtins {
            registry.seed_builtins();
        }

        let metrics = if config.enable_metrics {
            Some(ValidationMetricsRegistry::new()?)
        } else {
            None
        };

        let mut validator = ContractValidator::new(Arc::clone(&registry));
        if let Some(metrics) = &metrics {
            validator = validator.with_metrics(metrics.validation());
        }
        if config.record_events {
            validator = validator.with_recorder(Arc::new(EventRecorder::new(config.event_capacity)));
        }

        if let Some(path) = &config.definitions_path {
            let definitions = load_definitions_file(path)?;
            let count = definitions.len();
            for definition in definitions {
                validator.register(definition);
            }
            tracing::info!(path = %path.display(), count, "Registered additional output contracts");
        }

        Ok(Self { validator, metrics })
    }

    pub fn validator(&self) -> &ContractValidator {
        &self.validator
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        self.validator.registry()
    }

    pub fn metrics(&self) -> Option<&ValidationMetricsRegistry> {
        self.metrics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::BUILTIN_CODES;
    use crate::payload::Payload;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_agent() {
        let agent = OutputContractsAgent::from_config(&ContractsConfig::default()).unwrap();
        assert_eq!(agent.registry().len(), BUILTIN_CODES.len());
        assert!(agent.metrics().is_some());
        assert!(agent.validator().recorder().is_some());
    }

    #[test]
    fn test_agent_without_builtins_or_telemetry() {
        let config = ContractsConfig::builder()
            .seed_builtins(false)
            .enable_metrics(false)
            .record_events(false)
            .build();
        let agent = OutputContractsAgent::from_config(&config).unwrap();
        assert!(agent.registry().is_empty());
        assert!(agent.metrics().is_none());
        assert!(agent.validator().recorder().is_none());
    }

    #[test]
    fn test_agent_loads_extra_definitions() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            "{}",
            json!([{
                "code": "TRADE_SUGGESTION_V1",
                "name": "Stricter trade suggestion",
                "schema": {"type": "object", "required": ["action", "reasoning", "horizon"]}
            }])
        )
        .unwrap();

        let config = ContractsConfig::builder().definitions_path(file.path()).build();
        let agent = OutputContractsAgent::from_config(&config).unwrap();

        assert_eq!(agent.registry().len(), BUILTIN_CODES.len());
        let result = agent.validator().validate_by_code(
            "TRADE_SUGGESTION_V1",
            &Payload::from(json!({"action": "BUY", "reasoning": "x"})),
        );
        assert_eq!(result.errors(), &["$.horizon missing".to_string()]);

        let metrics = agent.metrics().unwrap().validation();
        assert_eq!(metrics.registered_schemas(), BUILTIN_CODES.len() as f64);
        assert_eq!(metrics.request_count("TRADE_SUGGESTION_V1", false), 1.0);
        assert_eq!(metrics.violation_count("TRADE_SUGGESTION_V1", "missing"), 1.0);
    }

    #[test]
    fn test_agent_rejects_bad_definitions_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[{{\"name\": \"no code\"}}]").unwrap();

        let config = ContractsConfig::builder().definitions_path(file.path()).build();
        assert!(OutputContractsAgent::from_config(&config).is_err());
    }
}
