//! Output Contracts CLI
//!
//! # Usage
//!
//! ```bash
//! output-contracts list
//! output-contracts show RISK_ASSESSMENT_V1 --format yaml
//! output-contracts validate --code TRADE_SUGGESTION_V1 --payload out.json
//! output-contracts check --schema schema.json --payload out.json
//! output-contracts lint --code AGENT_OUTPUT_V1
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - payload conforms
//! - 1: Validation failed (or lint findings)
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Definitions could not be decoded
//! - 10: Internal error

use clap::Parser;
use output_contracts::{run_cli, ContractsCli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = ContractsCli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if cli.config().log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
