//! bistro CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Dishes left unprepared

use std::process::ExitCode;

use bistro_core::KitchenError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands, UnpreparedDishes};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const UNPREPARED: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "bistro_cli=debug,bistro_core=debug"
    } else if cli.quiet {
        "warn"
    } else {
        "bistro_cli=info,bistro_core=info"
    };

    // A subscriber may already be installed; keep it
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},warn", level))),
        )
        .try_init();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Sample(args) => commands::sample::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<UnpreparedDishes>().is_some() {
        return ExitCodes::UNPREPARED;
    }

    match e.downcast_ref::<KitchenError>() {
        Some(KitchenError::Config(_)) | Some(KitchenError::Yaml(_)) => ExitCodes::CONFIG_ERROR,
        Some(KitchenError::StationNotFound(_)) | Some(KitchenError::InvalidMerge(_)) => {
            ExitCodes::INVALID_ARGS
        }
        _ => ExitCodes::GENERAL_ERROR,
    }
}
