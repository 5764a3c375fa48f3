//! Error types for the output contracts agent
//!
//! Validation itself never fails; these errors cover the outer surfaces:
//! reading documents, decoding definitions, rendering output and metrics.

use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum ContractError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Document parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A document did not decode into schema definitions
    #[error("Definition error: {0}")]
    DefinitionError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Telemetry setup or export error
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] crate::telemetry::TelemetryError),
}

impl ContractError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ContractError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        ContractError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ContractError::ParseError(msg.into())
    }

    /// Create a definition error
    pub fn definition_error(msg: impl Into<String>) -> Self {
        ContractError::DefinitionError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ContractError::InvalidInput(_)
                | ContractError::FileError(_)
                | ContractError::ParseError(_)
                | ContractError::DefinitionError(_)
        )
    }
}

impl From<std::io::Error> for ContractError {
    fn from(err: std::io::Error) -> Self {
        ContractError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        ContractError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ContractError {
    fn from(err: serde_yaml::Error) -> Self {
        ContractError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ContractError {
    fn from(err: toml::de::Error) -> Self {
        ContractError::ParseError(format!("TOML error: {}", err))
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, ContractError>;
