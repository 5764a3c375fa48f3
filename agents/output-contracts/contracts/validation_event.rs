//! Validation event records
//!
//! A [`ValidationEvent`] is the audit record of one gate decision: which
//! contract was applied, a hash of the inputs, and the verdict with its
//! messages. Events are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationResult;

/// Audit record of a single validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationEvent {
    /// Unique identifier for this event
    pub event_id: Uuid,

    /// Agent identifier
    pub agent_id: String,

    /// Agent version
    pub agent_version: String,

    /// Code of the contract applied; `None` for ad-hoc schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_code: Option<String>,

    /// SHA-256 of the schema code and canonical payload
    pub inputs_hash: String,

    /// Verdict
    pub valid: bool,

    pub error_count: usize,

    /// Messages, verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// Validation wall time in microseconds
    pub duration_us: u64,

    pub timestamp: DateTime<Utc>,
}

impl ValidationEvent {
    /// Agent identifier recorded on every event
    pub const AGENT_ID: &'static str = crate::AGENT_ID;

    /// Create an event from a finished validation
    pub fn from_result(
        schema_code: Option<&str>,
        inputs_hash: String,
        result: &ValidationResult,
        duration_us: u64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            agent_id: Self::AGENT_ID.to_string(),
            agent_version: crate::AGENT_VERSION.to_string(),
            schema_code: schema_code.map(str::to_string),
            inputs_hash,
            valid: result.is_valid(),
            error_count: result.errors().len(),
            errors: result.errors().to_vec(),
            duration_us,
            timestamp: Utc::now(),
        }
    }
}
