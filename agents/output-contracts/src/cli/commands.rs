//! CLI command definitions for the output contracts agent

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use super::output::{self, OutputFormat, ValidationOutput};
use super::ExitCode;
use crate::agent::OutputContractsAgent;
use crate::config::ContractsConfig;
use crate::error::ContractError;
use crate::lint::lint_schema;
use crate::loader::{load_document, load_payload};
use crate::schema::SchemaNode;

/// Output Contracts CLI
///
/// Browse the output contract catalog and validate agent output against it.
#[derive(Parser, Debug)]
#[command(name = "output-contracts")]
#[command(about = "Output contract registry and structural validator", long_about = None)]
#[command(version)]
pub struct ContractsCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Additional definitions file (json, yaml, toml) registered after the built-ins
    #[arg(long, global = true, env = "OUTPUT_CONTRACTS_DEFINITIONS")]
    pub definitions: Option<PathBuf>,

    /// Do not register the built-in catalog
    #[arg(long, global = true)]
    pub no_builtins: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Print Prometheus metrics after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: ContractsCommands,
}

impl ContractsCli {
    /// Resolve configuration: environment first, then flags
    pub fn config(&self) -> ContractsConfig {
        let mut config = ContractsConfig::from_env();
        if let Some(path) = &self.definitions {
            config.definitions_path = Some(path.clone());
        }
        if self.no_builtins {
            config.seed_builtins = false;
        }
        if self.metrics {
            config.enable_metrics = true;
        }
        config
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum ContractsCommands {
    /// List registered contracts
    List,

    /// Show one contract, including its schema
    Show {
        /// Schema code (case-sensitive)
        code: String,
    },

    /// Validate a payload file against a registered contract
    Validate {
        /// Schema code (case-sensitive)
        #[arg(short, long)]
        code: String,

        /// Payload file (json, yaml, toml)
        #[arg(short, long)]
        payload: PathBuf,
    },

    /// Validate a payload file against a schema file
    Check {
        /// Schema file (json, yaml, toml)
        #[arg(short, long)]
        schema: PathBuf,

        /// Payload file (json, yaml, toml)
        #[arg(short, long)]
        payload: PathBuf,
    },

    /// Report schema constructs the validator ignores
    Lint {
        /// Schema file (json, yaml, toml)
        #[arg(short, long, conflicts_with = "code", required_unless_present = "code")]
        schema: Option<PathBuf>,

        /// Registered schema code
        #[arg(short, long)]
        code: Option<String>,
    },
}

/// Execute the list command
pub fn execute_list(
    agent: &OutputContractsAgent,
    format: OutputFormat,
) -> Result<ExitCode, ContractError> {
    let summaries = agent.registry().summaries();
    output::render_catalog(&summaries, format)?;
    Ok(ExitCode::Success)
}

/// Execute the show command
pub fn execute_show(
    agent: &OutputContractsAgent,
    code: &str,
    format: OutputFormat,
) -> Result<ExitCode, ContractError> {
    let definition = agent
        .registry()
        .get_by_code(code)
        .ok_or_else(|| ContractError::invalid_input(format!("schema not registered: {}", code)))?;
    output::render_definition(&definition, format)?;
    Ok(ExitCode::Success)
}

/// Execute the validate command
pub fn execute_validate(
    agent: &OutputContractsAgent,
    code: &str,
    payload: &Path,
    format: OutputFormat,
) -> Result<ExitCode, ContractError> {
    let payload = load_payload(payload)?;
    let result = agent.validator().validate_by_code(code, &payload);

    ValidationOutput::from_result(Some(code), &result).render(format)?;
    Ok(ExitCode::from_verdict(result.is_valid()))
}

/// Execute the check command
pub fn execute_check(
    agent: &OutputContractsAgent,
    schema: &Path,
    payload: &Path,
    format: OutputFormat,
) -> Result<ExitCode, ContractError> {
    let schema = SchemaNode::from_value(load_document(schema)?);
    let payload = load_payload(payload)?;
    let result = agent.validator().validate_against_schema(&schema, &payload);

    ValidationOutput::from_result(None, &result).render(format)?;
    Ok(ExitCode::from_verdict(result.is_valid()))
}

/// Execute the lint command
pub fn execute_lint(
    agent: &OutputContractsAgent,
    schema: Option<&Path>,
    code: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode, ContractError> {
    let document = match (schema, code) {
        (Some(path), _) => load_document(path)?,
        (None, Some(code)) => agent
            .registry()
            .get_by_code(code)
            .map(|definition| definition.schema.as_value().clone())
            .ok_or_else(|| {
                ContractError::invalid_input(format!("schema not registered: {}", code))
            })?,
        (None, None) => {
            return Err(ContractError::invalid_input(
                "either --schema or --code is required",
            ))
        }
    };

    let findings = lint_schema(&document);
    output::render_lint(&findings, format)?;
    Ok(ExitCode::from_verdict(findings.is_empty()))
}
