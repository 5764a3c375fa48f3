//! Validation event recording
//!
//! Keeps a bounded, append-only log of [`ValidationEvent`]s in memory and
//! mirrors each one to `tracing` so the host's log pipeline sees every gate
//! decision.

use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::contracts::ValidationEvent;
use crate::payload::Payload;

/// Default number of events kept in memory
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

/// Compute the deterministic inputs hash of a validation.
///
/// Hashes the schema code (empty for ad-hoc schemas) and the canonical JSON
/// of the payload.
pub fn calculate_inputs_hash(code: Option<&str>, payload: &Payload) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.unwrap_or("").as_bytes());
    hasher.update(b"\n");
    hasher.update(payload.to_canonical_json().as_bytes());
    hex::encode(hasher.finalize())
}

/// Bounded in-memory event log
pub struct EventRecorder {
    capacity: usize,
    events: Mutex<VecDeque<ValidationEvent>>,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventRecorder {
    /// Create a recorder keeping at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append an event, evicting the oldest when full
    pub fn record(&self, event: ValidationEvent) {
        tracing::info!(
            event_id = %event.event_id,
            schema_code = event.schema_code.as_deref().unwrap_or("-"),
            valid = event.valid,
            error_count = event.error_count,
            inputs_hash = %event.inputs_hash,
            duration_us = event.duration_us,
            "Output validation recorded"
        );

        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Snapshot of recorded events, oldest first
    pub fn recent(&self) -> Vec<ValidationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
