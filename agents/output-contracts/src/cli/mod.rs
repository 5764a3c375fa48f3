//! CLI module for the output contracts agent
//!
//! Lists the contract catalog, validates payload files against a registered
//! code or an ad-hoc schema file, and lints schema documents.

pub mod commands;
pub mod output;

pub use commands::{ContractsCli, ContractsCommands};
pub use output::{OutputFormat, ValidationOutput};

use crate::agent::OutputContractsAgent;
use crate::error::ContractError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, payload conforms
    Success = 0,
    /// Payload has structural violations (or lint findings)
    ValidationFailed = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Definitions could not be decoded
    DefinitionError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from a verdict
    pub fn from_verdict(valid: bool) -> Self {
        if valid {
            ExitCode::Success
        } else {
            ExitCode::ValidationFailed
        }
    }

    /// Map an error to its exit code
    pub fn from_error(err: &ContractError) -> Self {
        match err {
            ContractError::InvalidInput(_) | ContractError::ParseError(_) => ExitCode::InvalidInput,
            ContractError::FileError(_) => ExitCode::FileError,
            ContractError::DefinitionError(_) => ExitCode::DefinitionError,
            ContractError::SerializationError(_) | ContractError::Telemetry(_) => {
                ExitCode::InternalError
            }
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: ContractsCli) -> Result<ExitCode, ContractError> {
    let config = cli.config();
    let agent = OutputContractsAgent::from_config(&config)?;
    let format = cli.format;

    let code = match cli.command {
        ContractsCommands::List => commands::execute_list(&agent, format)?,
        ContractsCommands::Show { code } => commands::execute_show(&agent, &code, format)?,
        ContractsCommands::Validate { code, payload } => {
            commands::execute_validate(&agent, &code, &payload, format)?
        }
        ContractsCommands::Check { schema, payload } => {
            commands::execute_check(&agent, &schema, &payload, format)?
        }
        ContractsCommands::Lint { schema, code } => {
            commands::execute_lint(&agent, schema.as_deref(), code.as_deref(), format)?
        }
    };

    if cli.metrics {
        if let Some(metrics) = agent.metrics() {
            print!("{}", metrics.export()?);
        }
    }

    Ok(code)
}
