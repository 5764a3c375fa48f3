//! Candidate payload values
//!
//! Agent output arrives as an arbitrary JSON-like document. [`Payload`] is the
//! sum type the validator walks: every shape a value can take is a variant, so
//! the traversal is an exhaustive `match` instead of runtime type probing.
//!
//! Unlike `serde_json::Value`, a [`Payload`] number is a plain `f64` and may
//! hold NaN or an infinity. Those values can reach the validator from
//! in-process producers and must be reported as non-numbers.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A candidate value checked against a schema node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// JSON null
    Null,
    /// true / false
    Bool(bool),
    /// Any numeric value, including non-finite ones
    Number(f64),
    /// Textual value
    String(String),
    /// Ordered list
    Array(Vec<Payload>),
    /// Key-value structure; keys are kept sorted so serialization is canonical
    Object(BTreeMap<String, Payload>),
}

impl Payload {
    /// Returns the number if this is a finite numeric value
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            Payload::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Returns the map if this is a key-value structure
    pub fn as_object(&self) -> Option<&BTreeMap<String, Payload>> {
        match self {
            Payload::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a property on an object value
    pub fn get(&self, key: &str) -> Option<&Payload> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Literal equality used for enumerated values.
    ///
    /// Scalars compare by value (so NaN never equals anything). Arrays and
    /// objects never compare equal: an enum member is a literal, and a
    /// container in the payload is never the same literal.
    pub fn strictly_equals(&self, other: &Payload) -> bool {
        match (self, other) {
            (Payload::Null, Payload::Null) => true,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Number(a), Payload::Number(b)) => a == b,
            (Payload::String(a), Payload::String(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical JSON text (sorted keys). Non-finite numbers render as `null`.
    pub fn to_canonical_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Payload::Null,
            serde_json::Value::Bool(b) => Payload::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Payload::Number).unwrap_or(Payload::Null),
            serde_json::Value::String(s) => Payload::String(s),
            serde_json::Value::Array(items) => {
                Payload::Array(items.into_iter().map(Payload::from).collect())
            }
            serde_json::Value::Object(map) => Payload::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Payload::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Payload {
    fn from(value: &serde_json::Value) -> Self {
        Payload::from(value.clone())
    }
}

impl From<&Payload> for serde_json::Value {
    fn from(payload: &Payload) -> Self {
        match payload {
            Payload::Null => serde_json::Value::Null,
            Payload::Bool(b) => serde_json::Value::Bool(*b),
            Payload::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Payload::String(s) => serde_json::Value::String(s.clone()),
            Payload::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Payload::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<f64> for Payload {
    fn from(n: f64) -> Self {
        Payload::Number(n)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Bool(b)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::String(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::String(s)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Payload::from)
    }
}
