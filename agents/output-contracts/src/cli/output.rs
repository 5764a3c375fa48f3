//! Output formatting for the output contracts CLI
//!
//! JSON and YAML for machines, a colored table for people.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::contracts::{SchemaDefinition, SchemaSummary, ValidationResult};
use crate::error::ContractError;
use crate::lint::LintFinding;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Validation output structure for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    /// Schema code, absent for ad-hoc schema files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Overall verdict
    pub valid: bool,
    /// Number of violations
    pub error_count: usize,
    /// Violation messages in report order
    pub errors: Vec<String>,
    /// Summary message
    pub summary: String,
}

impl ValidationOutput {
    /// Create output from a validation result
    pub fn from_result(code: Option<&str>, result: &ValidationResult) -> Self {
        let errors = result.errors().to_vec();
        let error_count = errors.len();
        let subject = match code {
            Some(code) => format!("Payload for {}", code),
            None => "Payload".to_string(),
        };

        let summary = if result.is_valid() {
            format!("{} conforms", subject)
        } else {
            format!("{} has {} violation(s)", subject, error_count)
        };

        Self {
            code: code.map(str::to_string),
            valid: result.is_valid(),
            error_count,
            errors,
            summary,
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<(), ContractError> {
        match format {
            OutputFormat::Json => render_json(self),
            OutputFormat::Yaml => render_yaml(self),
            OutputFormat::Table => {
                self.render_table();
                Ok(())
            }
        }
    }

    fn render_table(&self) {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Validation Results".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();
        writeln!(stdout).ok();

        let status = if self.valid { "+".green() } else { "x".red() };
        writeln!(stdout, "{} {}", status, self.summary).ok();

        if !self.errors.is_empty() {
            writeln!(stdout).ok();
            writeln!(stdout, "{}", "Violations:".cyan().bold()).ok();
            writeln!(stdout, "{}", "-".repeat(60)).ok();
            for (index, error) in self.errors.iter().enumerate() {
                writeln!(stdout, "  {} {}", format!("{:>3}.", index + 1).dimmed(), error).ok();
            }
        }

        stdout.flush().ok();
    }
}

/// Render the contract catalog
pub fn render_catalog(summaries: &[SchemaSummary], format: OutputFormat) -> Result<(), ContractError> {
    match format {
        OutputFormat::Json => render_json(&summaries),
        OutputFormat::Yaml => render_yaml(&summaries),
        OutputFormat::Table => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", "Output Contracts".cyan().bold()).ok();
            writeln!(stdout, "{}", "=".repeat(60)).ok();

            if summaries.is_empty() {
                writeln!(stdout, "{}", "No contracts registered".dimmed()).ok();
            }
            let width = summaries.iter().map(|s| s.code.len()).max().unwrap_or(0);
            for summary in summaries {
                writeln!(
                    stdout,
                    "  {:<width$}  {}",
                    summary.code.bold(),
                    summary.name,
                    width = width
                )
                .ok();
                if let Some(description) = &summary.description {
                    writeln!(stdout, "  {:<width$}  {}", "", description.dimmed(), width = width)
                        .ok();
                }
            }

            stdout.flush().ok();
            Ok(())
        }
    }
}

/// Render a single definition including its schema
pub fn render_definition(
    definition: &SchemaDefinition,
    format: OutputFormat,
) -> Result<(), ContractError> {
    match format {
        OutputFormat::Json => render_json(definition),
        OutputFormat::Yaml => render_yaml(definition),
        OutputFormat::Table => {
            let schema = serde_json::to_string_pretty(definition.schema.as_value())
                .map_err(|e| ContractError::SerializationError(e.to_string()))?;

            let mut stdout = io::stdout();
            writeln!(stdout, "{} {}", "Code:".cyan().bold(), definition.code).ok();
            writeln!(stdout, "{} {}", "Name:".cyan().bold(), definition.name).ok();
            if let Some(description) = &definition.description {
                writeln!(stdout, "{} {}", "Description:".cyan().bold(), description).ok();
            }
            writeln!(stdout, "{}", "Schema:".cyan().bold()).ok();
            writeln!(stdout, "{}", schema).ok();

            stdout.flush().ok();
            Ok(())
        }
    }
}

/// Render schema lint findings
pub fn render_lint(findings: &[LintFinding], format: OutputFormat) -> Result<(), ContractError> {
    match format {
        OutputFormat::Json => render_json(&findings),
        OutputFormat::Yaml => render_yaml(&findings),
        OutputFormat::Table => {
            let mut stdout = io::stdout();
            if findings.is_empty() {
                writeln!(stdout, "{} Schema is clean", "+".green()).ok();
            } else {
                writeln!(
                    stdout,
                    "{} {} construct(s) will be ignored by validation",
                    "!".yellow(),
                    findings.len()
                )
                .ok();
                for finding in findings {
                    writeln!(stdout, "  {} {}", "-".yellow(), finding).ok();
                }
            }

            stdout.flush().ok();
            Ok(())
        }
    }
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ContractError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ContractError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn render_yaml<T: Serialize + ?Sized>(value: &T) -> Result<(), ContractError> {
    let yaml = serde_yaml::to_string(value)
        .map_err(|e| ContractError::SerializationError(e.to_string()))?;
    println!("{}", yaml);
    Ok(())
}
