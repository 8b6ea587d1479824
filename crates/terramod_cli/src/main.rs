//! terramod CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Schema error
//! - 4: Generation backend error
//! - 5: Consistency/validation error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod docs;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const SCHEMA_ERROR: u8 = 3;
    pub const GENERATION_ERROR: u8 = 4;
    pub const CONSISTENCY_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("terramod=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ExportSchema(args) => commands::export_schema::execute(args).await,
        Commands::Extract(args) => commands::extract::execute(args).await,
        Commands::Generate(args) => commands::generate::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = format!("{:#}", e).to_lowercase();

    if msg.contains("not found in schema") {
        ExitCodes::SCHEMA_ERROR
    } else if msg.contains("mismatch")
        || msg.contains("exactly one")
        || msg.contains("consistency")
        || msg.contains("sanitization")
    {
        ExitCodes::CONSISTENCY_ERROR
    } else if msg.contains("backend") || msg.contains("generation") {
        ExitCodes::GENERATION_ERROR
    } else if msg.contains("argument") || msg.contains("usage") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
