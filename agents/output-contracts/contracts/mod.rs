//! Output Contract Definitions
//!
//! Data contracts exchanged between the registry, the validator and the
//! surrounding application.
//!
//! # Design Principles
//!
//! - **Read-only**: validation classifies and explains, it never enforces
//! - **Total**: every validation call yields a [`ValidationResult`]
//! - **Traceable**: each result can be recorded as a [`ValidationEvent`]

pub mod catalog;
pub mod validation_event;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::SchemaNode;

pub use catalog::{builtin_definitions, BUILTIN_CODES};
pub use validation_event::ValidationEvent;

/// Path of the validated value itself
pub const ROOT_PATH: &str = "$";

/// A named structural contract
///
/// Definitions handed out by the registry are shared and immutable; a new
/// registration under the same code replaces the whole definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Unique, case-sensitive lookup key
    pub code: String,

    /// Human-readable label
    pub name: String,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Root node of the contract
    pub schema: SchemaNode,
}

impl SchemaDefinition {
    /// Create a new definition
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        schema: impl Into<SchemaNode>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            schema: schema.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Catalog view of this definition
    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Catalog entry shown to operators choosing a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Kind of structural violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Value does not have the declared type
    TypeMismatch { expected: String },
    /// Value is not one of the enumerated literals
    NotInEnum,
    /// Number is below `minimum`
    BelowMinimum { minimum: f64 },
    /// Number is above `maximum`
    AboveMaximum { maximum: f64 },
    /// Required key is absent
    Missing,
    /// No definition is registered under the requested code
    Unregistered { code: String },
}

impl ViolationKind {
    /// Short label used for metrics
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::TypeMismatch { .. } => "type",
            ViolationKind::NotInEnum => "enum",
            ViolationKind::BelowMinimum { .. } => "minimum",
            ViolationKind::AboveMaximum { .. } => "maximum",
            ViolationKind::Missing => "missing",
            ViolationKind::Unregistered { .. } => "unregistered",
        }
    }
}

/// A single path-qualified violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Root-relative path (`$`, `$.foo`, `$.list[2].bar`)
    pub path: String,

    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn unregistered(code: impl Into<String>) -> Self {
        Self::new(ROOT_PATH, ViolationKind::Unregistered { code: code.into() })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::TypeMismatch { expected } => {
                write!(f, "{} type mismatch, expected {}", self.path, expected)
            }
            ViolationKind::NotInEnum => {
                write!(f, "{} not among allowed enumerated values", self.path)
            }
            ViolationKind::BelowMinimum { minimum } => {
                write!(f, "{} below minimum {}", self.path, minimum)
            }
            ViolationKind::AboveMaximum { maximum } => {
                write!(f, "{} exceeds maximum {}", self.path, maximum)
            }
            ViolationKind::Missing => write!(f, "{} missing", self.path),
            ViolationKind::Unregistered { code } => write!(f, "schema not registered: {}", code),
        }
    }
}

/// Outcome of validating a payload
///
/// `valid` is derived from `errors` and cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValidationResult")]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct RawValidationResult {
    valid: bool,
    #[serde(default)]
    errors: Vec<String>,
}

impl TryFrom<RawValidationResult> for ValidationResult {
    type Error = String;

    fn try_from(raw: RawValidationResult) -> Result<Self, Self::Error> {
        if raw.valid != raw.errors.is_empty() {
            return Err(format!(
                "inconsistent validation result: valid={} with {} error(s)",
                raw.valid,
                raw.errors.len()
            ));
        }
        Ok(Self::from_errors(raw.errors))
    }
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from messages; valid iff there are none
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Build a result from violations, preserving their order
    pub fn from_violations(violations: &[Violation]) -> Self {
        Self::from_errors(violations.iter().map(|v| v.to_string()).collect())
    }

    /// The result returned for an unknown schema code
    pub fn unregistered(code: &str) -> Self {
        Self::from_violations(&[Violation::unregistered(code)])
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Violation messages in discovery order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
