//! Prometheus metrics for output contract validation
//!
//! - `output_contracts_validation_requests_total` (counter) - Requests by code and result
//! - `output_contracts_validation_duration_seconds` (histogram) - Validation duration
//! - `output_contracts_violations_total` (counter) - Violations by code and kind
//! - `output_contracts_registrations_total` (counter) - Runtime registrations
//! - `output_contracts_registered_schemas` (gauge) - Definitions currently registered
//!
//! # Example
//!
//! ```rust
//! use output_contracts::telemetry::ValidationMetricsRegistry;
//!
//! let registry = ValidationMetricsRegistry::new().unwrap();
//! let metrics = registry.validation();
//!
//! metrics.record_request("TRADE_SUGGESTION_V1", true);
//! metrics.observe_duration("TRADE_SUGGESTION_V1", 0.0002);
//! metrics.record_violation("RISK_ASSESSMENT_V1", "missing");
//! ```

use prometheus::{
    Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use super::{Result, TelemetryError};

const NAMESPACE: &str = "output_contracts";

/// Validation metrics for Prometheus
pub struct ValidationMetrics {
    /// Validation requests (by code, result)
    requests_total: CounterVec,

    /// Validation duration in seconds (by code)
    duration_seconds: HistogramVec,

    /// Violations found (by code, kind)
    violations_total: CounterVec,

    registrations_total: Counter,

    registered_schemas: Gauge,
}

impl ValidationMetrics {
    /// Create the metrics and register them with `registry`
    pub fn new(registry: &Registry) -> Result<Self> {
        let requests_total = CounterVec::new(
            Opts::new(
                "validation_requests_total",
                "Total number of output validation requests",
            )
            .namespace(NAMESPACE),
            &["code", "result"],
        )?;

        let duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "validation_duration_seconds",
                "Output validation duration in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
            &["code"],
        )?;

        let violations_total = CounterVec::new(
            Opts::new(
                "violations_total",
                "Total number of structural violations by kind",
            )
            .namespace(NAMESPACE),
            &["code", "kind"],
        )?;

        let registrations_total = Counter::with_opts(
            Opts::new(
                "registrations_total",
                "Total number of schema definitions registered at runtime",
            )
            .namespace(NAMESPACE),
        )?;

        let registered_schemas = Gauge::with_opts(
            Opts::new(
                "registered_schemas",
                "Number of schema definitions currently registered",
            )
            .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(duration_seconds.clone()))?;
        registry.register(Box::new(violations_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(registered_schemas.clone()))?;

        Ok(Self {
            requests_total,
            duration_seconds,
            violations_total,
            registrations_total,
            registered_schemas,
        })
    }

    /// Record a validation request
    pub fn record_request(&self, code: &str, valid: bool) {
        let result = if valid { "valid" } else { "invalid" };
        self.requests_total.with_label_values(&[code, result]).inc();
    }

    /// Observe validation duration
    pub fn observe_duration(&self, code: &str, duration_secs: f64) {
        self.duration_seconds
            .with_label_values(&[code])
            .observe(duration_secs);
    }

    /// Record one violation
    pub fn record_violation(&self, code: &str, kind: &str) {
        self.violations_total.with_label_values(&[code, kind]).inc();
    }

    pub fn record_registration(&self) {
        self.registrations_total.inc();
    }

    pub fn set_registered_schemas(&self, count: usize) {
        self.registered_schemas.set(count as f64);
    }

    /// Requests recorded for a code and result
    pub fn request_count(&self, code: &str, valid: bool) -> f64 {
        let result = if valid { "valid" } else { "invalid" };
        self.requests_total.with_label_values(&[code, result]).get()
    }

    /// Violations recorded for a code and kind
    pub fn violation_count(&self, code: &str, kind: &str) -> f64 {
        self.violations_total.with_label_values(&[code, kind]).get()
    }

    pub fn registered_schemas(&self) -> f64 {
        self.registered_schemas.get()
    }
}

/// Owns the Prometheus registry and the validation metrics
pub struct ValidationMetricsRegistry {
    registry: Registry,
    validation: Arc<ValidationMetrics>,
}

impl ValidationMetricsRegistry {
    /// Create a fresh registry with all metrics registered
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let validation = ValidationMetrics::new(&registry)?;
        Ok(Self {
            registry,
            validation: Arc::new(validation),
        })
    }

    /// Shared handle to the validation metrics
    pub fn validation(&self) -> Arc<ValidationMetrics> {
        Arc::clone(&self.validation)
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::EncodingFailed(e.to_string()))
    }
}
