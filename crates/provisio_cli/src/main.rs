//! provisio CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Any failure (invalid input, Terraform stage failure, resource not found)
//! - 2: Invalid command-line arguments (reported by clap)

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// Process exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let result = match cli.command.unwrap_or(Commands::Provision) {
        Commands::Provision => commands::provision::execute(&cli.global).await,
        Commands::Render(args) => commands::render::execute(&cli.global, args).await,
        Commands::Check => commands::check::execute(&cli.global).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(ExitCodes::FAILURE)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [format!("provisio={}", level), "warn".to_string()] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Already initialized (e.g. under a test harness) is fine
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
