//! Telemetry for output contract validation
//!
//! - `metrics` - Prometheus counters, histograms and gauges
//! - `recorder` - In-memory validation event log, mirrored to `tracing`

pub mod metrics;
pub mod recorder;

pub use metrics::{ValidationMetrics, ValidationMetricsRegistry};
pub use recorder::{calculate_inputs_hash, EventRecorder, DEFAULT_EVENT_CAPACITY};

use thiserror::Error;

/// Telemetry errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Failed to encode metrics: {0}")]
    EncodingFailed(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
