//! Output Contracts Agent
//!
//! A registry of named structural contracts for agent output and a
//! validator that checks payloads against them.
//!
//! ## Features
//!
//! - **Contract Catalog**: Built-in contracts for market analysis, risk
//!   assessment, trade suggestions and generic agent output
//! - **Structural Validation**: A small schema language (`type`, `enum`,
//!   `minimum`, `maximum`, `required`, `properties`, `items`) with
//!   path-qualified violation messages
//! - **Total**: Validation never fails; unknown codes and malformed
//!   contracts are reported through the result
//! - **Telemetry**: Prometheus metrics and an in-memory validation event log
//! - **CLI Support**: Browse the catalog, validate payload files, lint schemas
//!
//! ## Architecture
//!
//! 1. **Contracts** (`contracts/`): Definitions, results, violations, the
//!    built-in catalog and validation events.
//! 2. **Schema** (`schema`): Tolerant typed view over a schema document.
//! 3. **Registry** (`registry`): Thread-safe code to definition map.
//! 4. **Validation** (`validation`): The recursive validator and the
//!    [`ContractValidator`] facade.
//! 5. **Telemetry** (`telemetry/`): Metrics and event recording.
//! 6. **CLI** (`cli/`): Command-line interface with machine-readable output.
//!
//! ## CLI Usage
//!
//! ```bash
//! # List registered contracts
//! output-contracts list
//!
//! # Validate agent output against a contract
//! output-contracts validate --code TRADE_SUGGESTION_V1 --payload out.json --format json
//!
//! # Validate against an ad-hoc schema file
//! output-contracts check --schema schema.yaml --payload out.json
//! ```
//!
//! ## Example
//!
//! ```rust
//! use output_contracts::{validate_by_code, Payload, SchemaRegistry};
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::with_builtins();
//! let payload = Payload::from(json!({"action": "BUY", "reasoning": "momentum"}));
//!
//! let result = validate_by_code(&registry, "TRADE_SUGGESTION_V1", &payload);
//! assert!(result.is_valid());
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod loader;
pub mod payload;
pub mod registry;
pub mod schema;
pub mod telemetry;
pub mod validation;

// Contracts module - located at ../contracts relative to src/
#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use agent::OutputContractsAgent;
pub use config::{ContractsConfig, ContractsConfigBuilder};
pub use contracts::{
    builtin_definitions, SchemaDefinition, SchemaSummary, ValidationEvent, ValidationResult,
    Violation, ViolationKind, BUILTIN_CODES,
};
pub use error::{ContractError, Result};
pub use lint::{lint_schema, LintFinding, LintIssue};
pub use payload::Payload;
pub use registry::SchemaRegistry;
pub use schema::{NodeType, SchemaNode};
pub use telemetry::{EventRecorder, TelemetryError, ValidationMetrics, ValidationMetricsRegistry};
pub use validation::{collect_violations, validate_against_schema, validate_by_code, ContractValidator};

pub use cli::{ContractsCli, ContractsCommands, ExitCode, OutputFormat};

/// Agent version (from Cargo.toml)
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Agent identifier
pub const AGENT_ID: &str = "output-contracts-agent";

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
pub fn run_cli(cli: ContractsCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
