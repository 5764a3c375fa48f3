//! Structural validation of agent output
//!
//! The core is a depth-first walk of a [`SchemaNode`] driven by the shape of
//! the [`Payload`]. Every violation is appended to a single sink, so the
//! resulting messages follow a strict pre-order: the node itself, then its
//! required-key checks, then children in declaration or index order.
//!
//! The walk only descends where the schema declares `properties` or
//! `items`, so its depth is bounded by the schema, never by the payload.
//! It never fails: unusable schema constructs are ignored and every
//! abnormal condition becomes a message.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::contracts::{
    SchemaDefinition, ValidationEvent, ValidationResult, Violation, ViolationKind, ROOT_PATH,
};
use crate::payload::Payload;
use crate::registry::SchemaRegistry;
use crate::schema::{NodeType, SchemaNode};
use crate::telemetry::{calculate_inputs_hash, EventRecorder, ValidationMetrics};

/// Metrics label used for schemas validated without a registry code
const ADHOC_LABEL: &str = "adhoc";

/// Walk `payload` against `schema` and return every violation in order
pub fn collect_violations(schema: &SchemaNode, payload: &Payload) -> Vec<Violation> {
    let mut violations = Vec::new();
    validate_node(schema, payload, ROOT_PATH, &mut violations);
    violations
}

/// Validate a payload against an arbitrary schema node
pub fn validate_against_schema(schema: &SchemaNode, payload: &Payload) -> ValidationResult {
    ValidationResult::from_violations(&collect_violations(schema, payload))
}

/// Validate a payload against the contract registered under `code`.
///
/// An unknown code yields a single `schema not registered` message and no
/// traversal.
pub fn validate_by_code(registry: &SchemaRegistry, code: &str, payload: &Payload) -> ValidationResult {
    match registry.get_by_code(code) {
        Some(definition) => validate_against_schema(&definition.schema, payload),
        None => ValidationResult::unregistered(code),
    }
}

fn validate_node(schema: &SchemaNode, value: &Payload, path: &str, sink: &mut Vec<Violation>) {
    // A type mismatch ends this node: nothing below it is meaningful.
    if let Some(expected) = &schema.node_type {
        if !expected.matches(value) {
            sink.push(Violation::new(
                path,
                ViolationKind::TypeMismatch {
                    expected: expected.to_string(),
                },
            ));
            return;
        }
    }

    if !schema.enum_values.is_empty()
        && !schema.enum_values.iter().any(|allowed| allowed.strictly_equals(value))
    {
        sink.push(Violation::new(path, ViolationKind::NotInEnum));
    }

    match (&schema.node_type, value) {
        (Some(NodeType::Number), _) => {
            if let Some(n) = value.as_finite_number() {
                check_bounds(schema, n, path, sink);
            }
        }
        (Some(NodeType::Object), Payload::Object(map)) => {
            for name in &schema.required {
                if !map.contains_key(name) {
                    sink.push(Violation::new(format!("{}.{}", path, name), ViolationKind::Missing));
                }
            }
            for (name, nested) in &schema.properties {
                if let Some(child) = map.get(name) {
                    validate_node(nested, child, &format!("{}.{}", path, name), sink);
                }
            }
        }
        (Some(NodeType::Array), Payload::Array(elements)) => {
            if let Some(items) = &schema.items {
                for (index, element) in elements.iter().enumerate() {
                    validate_node(items, element, &format!("{}[{}]", path, index), sink);
                }
            }
        }
        _ => {}
    }
}

fn check_bounds(schema: &SchemaNode, value: f64, path: &str, sink: &mut Vec<Violation>) {
    if let Some(minimum) = schema.minimum {
        if value < minimum {
            sink.push(Violation::new(path, ViolationKind::BelowMinimum { minimum }));
        }
    }
    if let Some(maximum) = schema.maximum {
        if value > maximum {
            sink.push(Violation::new(path, ViolationKind::AboveMaximum { maximum }));
        }
    }
}

/// Registry-backed validator with telemetry
///
/// Wraps the pure validation functions with metrics and audit events. The
/// verdict is identical to [`validate_by_code`] / [`validate_against_schema`].
#[derive(Clone)]
pub struct ContractValidator {
    registry: Arc<SchemaRegistry>,
    metrics: Option<Arc<ValidationMetrics>>,
    recorder: Option<Arc<EventRecorder>>,
}

impl ContractValidator {
    /// Create a validator over a shared registry
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            metrics: None,
            recorder: None,
        }
    }

    /// Attach Prometheus metrics
    pub fn with_metrics(mut self, metrics: Arc<ValidationMetrics>) -> Self {
        metrics.set_registered_schemas(self.registry.len());
        self.metrics = Some(metrics);
        self
    }

    /// Attach an event recorder
    pub fn with_recorder(mut self, recorder: Arc<EventRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn recorder(&self) -> Option<&Arc<EventRecorder>> {
        self.recorder.as_ref()
    }

    /// Register a definition, keeping registry metrics current
    pub fn register(&self, definition: SchemaDefinition) -> Option<Arc<SchemaDefinition>> {
        let previous = self.registry.register(definition);
        if let Some(metrics) = &self.metrics {
            metrics.record_registration();
            metrics.set_registered_schemas(self.registry.len());
        }
        previous
    }

    /// Validate against a registered contract
    pub fn validate_by_code(&self, code: &str, payload: &Payload) -> ValidationResult {
        let start = Instant::now();
        let violations = match self.registry.get_by_code(code) {
            Some(definition) => collect_violations(&definition.schema, payload),
            None => {
                tracing::warn!(code = %code, "Validation requested for unregistered schema");
                vec![Violation::unregistered(code)]
            }
        };
        self.finish(Some(code), payload, &violations, start)
    }

    /// Validate against a schema that need not be registered
    pub fn validate_against_schema(&self, schema: &SchemaNode, payload: &Payload) -> ValidationResult {
        let start = Instant::now();
        let violations = collect_violations(schema, payload);
        self.finish(None, payload, &violations, start)
    }

    /// Convenience wrapper for JSON payloads
    pub fn validate_json_by_code(&self, code: &str, payload: &serde_json::Value) -> ValidationResult {
        self.validate_by_code(code, &Payload::from(payload))
    }

    fn finish(
        &self,
        code: Option<&str>,
        payload: &Payload,
        violations: &[Violation],
        start: Instant,
    ) -> ValidationResult {
        let result = ValidationResult::from_violations(violations);
        let elapsed = start.elapsed();

        tracing::debug!(
            code = code.unwrap_or(ADHOC_LABEL),
            valid = result.is_valid(),
            errors = result.errors().len(),
            "Validated agent output"
        );

        if let Some(metrics) = &self.metrics {
            let label = self.metrics_label(code);
            metrics.record_request(label, result.is_valid());
            metrics.observe_duration(label, elapsed.as_secs_f64());
            for violation in violations {
                metrics.record_violation(label, violation.kind.label());
            }
        }

        if let Some(recorder) = &self.recorder {
            let event = ValidationEvent::from_result(
                code,
                calculate_inputs_hash(code, payload),
                &result,
                duration_micros(elapsed),
            );
            recorder.record(event);
        }

        result
    }

    // Unknown codes share one label so callers cannot grow metric cardinality.
    fn metrics_label<'a>(&self, code: Option<&'a str>) -> &'a str {
        match code {
            Some(code) if self.registry.contains(code) => code,
            Some(_) => "unregistered",
            None => ADHOC_LABEL,
        }
    }
}

/// Elapsed time in whole microseconds, saturating at `u64::MAX`
fn duration_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duration_micros_saturates() {
        assert_eq!(duration_micros(Duration::from_micros(250)), 250);
        assert_eq!(duration_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_bounds_skip_non_finite_numbers() {
        let untyped = node(json!({"minimum": 0, "maximum": 1}));
        assert!(validate_against_schema(&untyped, &Payload::Number(f64::INFINITY)).is_valid());

        let numeric = node(json!({"type": "number", "minimum": 0, "maximum": 1}));
        assert_eq!(
            validate_against_schema(&numeric, &Payload::Number(f64::NEG_INFINITY)).into_errors(),
            vec!["$ type mismatch, expected number"]
        );
        assert_eq!(
            validate_against_schema(&numeric, &Payload::Number(-0.5)).into_errors(),
            vec!["$ below minimum 0"]
        );
    }

    fn node(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(value)
    }

    fn errors(schema: serde_json::Value, payload: serde_json::Value) -> Vec<String> {
        validate_against_schema(&node(schema), &Payload::from(payload)).into_errors()
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        assert!(errors(json!({}), json!({"any": [1, 2]})).is_empty());
        assert!(errors(json!({}), json!(null)).is_empty());
    }

    #[test]
    fn test_root_type_mismatch() {
        assert_eq!(
            errors(json!({"type": "object", "required": ["a"]}), json!([1])),
            vec!["$ type mismatch, expected object"]
        );
        assert_eq!(
            errors(json!({"type": "object"}), json!(null)),
            vec!["$ type mismatch, expected object"]
        );
    }

    #[test]
    fn test_type_mismatch_stops_descent_but_not_siblings() {
        let schema = json!({
            "type": "object",
            "properties": {
                "a": {"type": "object", "required": ["deep"]},
                "b": {"type": "string"}
            }
        });
        assert_eq!(
            errors(schema, json!({"a": 5, "b": 6})),
            vec!["$.a type mismatch, expected object", "$.b type mismatch, expected string"]
        );
    }

    #[test]
    fn test_unknown_type_name_matches() {
        assert!(errors(json!({"type": "integer"}), json!("text")).is_empty());
    }

    #[test]
    fn test_non_finite_numbers_are_not_numbers() {
        let schema = node(json!({"type": "number", "minimum": 0}));
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = validate_against_schema(&schema, &Payload::Number(n));
            assert_eq!(result.errors(), &["$ type mismatch, expected number".to_string()]);
        }
    }

    #[test]
    fn test_enum_and_type_both_checked() {
        let schema = json!({"type": "string", "enum": ["LOW", "HIGH"]});
        assert!(errors(schema.clone(), json!("LOW")).is_empty());
        assert_eq!(
            errors(schema, json!("MID")),
            vec!["$ not among allowed enumerated values"]
        );
    }

    #[test]
    fn test_enum_without_type() {
        let schema = json!({"enum": [1, "one", null]});
        assert!(errors(schema.clone(), json!(1.0)).is_empty());
        assert!(errors(schema.clone(), json!(null)).is_empty());
        assert_eq!(errors(schema, json!(2)), vec!["$ not among allowed enumerated values"]);
    }

    #[test]
    fn test_enum_and_bounds_both_reported() {
        let schema = json!({"type": "number", "enum": [5], "maximum": 3});
        assert_eq!(
            errors(schema, json!(4)),
            vec!["$ not among allowed enumerated values", "$ exceeds maximum 3"]
        );
    }

    #[test]
    fn test_empty_enum_is_unconstrained() {
        assert!(errors(json!({"enum": []}), json!("x")).is_empty());
    }

    #[test]
    fn test_bounds() {
        let schema = json!({"type": "number", "minimum": 0, "maximum": 1});
        assert!(errors(schema.clone(), json!(0)).is_empty());
        assert!(errors(schema.clone(), json!(1)).is_empty());
        assert_eq!(errors(schema.clone(), json!(-0.5)), vec!["$ below minimum 0"]);
        assert_eq!(errors(schema, json!(1.5)), vec!["$ exceeds maximum 1"]);
    }

    #[test]
    fn test_inverted_bounds_report_both() {
        let schema = json!({"type": "number", "minimum": 10, "maximum": 0});
        assert_eq!(
            errors(schema, json!(5)),
            vec!["$ below minimum 10", "$ exceeds maximum 0"]
        );
    }

    #[test]
    fn test_bounds_ignored_without_number_type() {
        assert!(errors(json!({"minimum": 10}), json!(5)).is_empty());
    }

    #[test]
    fn test_required_checks_presence_not_value() {
        let schema = json!({"type": "object", "required": ["a", "b"]});
        assert!(errors(schema.clone(), json!({"a": null, "b": false})).is_empty());
        assert_eq!(errors(schema, json!({"a": 1})), vec!["$.b missing"]);
    }

    #[test]
    fn test_required_before_children() {
        let schema = json!({
            "type": "object",
            "required": ["x", "z"],
            "properties": {"x": {"type": "string"}}
        });
        assert_eq!(
            errors(schema, json!({"x": 1})),
            vec!["$.z missing", "$.x type mismatch, expected string"]
        );
    }

    #[test]
    fn test_properties_in_declaration_order() {
        let schema = json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "string"}
            }
        });
        assert_eq!(
            errors(schema, json!({"alpha": 1, "zeta": 2})),
            vec![
                "$.zeta type mismatch, expected string",
                "$.alpha type mismatch, expected string"
            ]
        );
    }

    #[test]
    fn test_undeclared_properties_ignored() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        assert!(errors(schema, json!({"a": "x", "extra": {"deep": [1]}})).is_empty());
    }

    #[test]
    fn test_absent_optional_property_not_validated() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        assert!(errors(schema, json!({})).is_empty());
    }

    #[test]
    fn test_nested_array_element_path() {
        let schema = json!({"type": "array", "items": {"type": "object", "required": ["x"]}});
        assert_eq!(errors(schema, json!([{"x": 1}, {}])), vec!["$[1].x missing"]);
    }

    #[test]
    fn test_deep_paths() {
        let schema = json!({
            "type": "object",
            "properties": {
                "list": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"bar": {"type": "number"}}
                    }
                }
            }
        });
        assert_eq!(
            errors(schema, json!({"list": [{"bar": 1}, {"bar": 2}, {"bar": "x"}]})),
            vec!["$.list[2].bar type mismatch, expected number"]
        );
    }

    #[test]
    fn test_array_without_items_is_unconstrained() {
        assert!(errors(json!({"type": "array"}), json!([1, "a", null])).is_empty());
        assert!(errors(json!({"type": "array", "items": "string"}), json!([1])).is_empty());
    }

    #[test]
    fn test_properties_without_object_type_not_descended() {
        let schema = json!({"properties": {"a": {"type": "string"}}, "required": ["b"]});
        assert!(errors(schema, json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_malformed_schema_entries_tolerated() {
        let schema = json!({
            "type": "object",
            "required": ["a", 3],
            "properties": {"a": "not-a-node", "b": {"type": "string"}}
        });
        assert_eq!(
            errors(schema, json!({"a": 1, "b": 2})),
            vec!["$.b type mismatch, expected string"]
        );
    }

    #[test]
    fn test_validate_by_code_unknown() {
        let registry = SchemaRegistry::with_builtins();
        let result = validate_by_code(&registry, "NOT_A_REAL_CODE", &Payload::from(json!({})));
        assert!(!result.is_valid());
        assert_eq!(result.errors(), &["schema not registered: NOT_A_REAL_CODE".to_string()]);
    }

    #[test]
    fn test_validate_by_code_case_sensitive() {
        let registry = SchemaRegistry::with_builtins();
        let payload = Payload::from(json!({"action": "BUY", "reasoning": "x"}));
        assert!(validate_by_code(&registry, "TRADE_SUGGESTION_V1", &payload).is_valid());
        assert!(!validate_by_code(&registry, "trade_suggestion_v1", &payload).is_valid());
    }

    #[test]
    fn test_contract_validator_records_events() {
        let registry = Arc::new(SchemaRegistry::with_builtins());
        let recorder = Arc::new(EventRecorder::new(10));
        let validator = ContractValidator::new(registry).with_recorder(Arc::clone(&recorder));

        let result = validator.validate_json_by_code(
            "RISK_ASSESSMENT_V1",
            &json!({"riskLevel": "HIGH", "score": 80}),
        );
        assert!(!result.is_valid());

        let events = recorder.recent();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].schema_code.as_deref(), Some("RISK_ASSESSMENT_V1"));
        assert_eq!(events[0].errors, result.errors().to_vec());
        assert_eq!(events[0].inputs_hash.len(), 64);
    }

    #[test]
    fn test_contract_validator_matches_pure_functions() {
        let registry = Arc::new(SchemaRegistry::with_builtins());
        let validator = ContractValidator::new(Arc::clone(&registry));
        let payload = Payload::from(json!({"thesis": 1, "confidence": 2, "evidence": [3]}));

        assert_eq!(
            validator.validate_by_code("MARKET_ANALYSIS_V1", &payload),
            validate_by_code(&registry, "MARKET_ANALYSIS_V1", &payload)
        );
        assert_eq!(
            validator.validate_by_code("MISSING", &payload),
            ValidationResult::unregistered("MISSING")
        );
    }
}
