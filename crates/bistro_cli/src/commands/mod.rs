//! CLI command definitions.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bistro_core::KitchenConfig;
use clap::{Parser, Subcommand};

pub mod check;
pub mod run;
pub mod sample;

/// bistro - kitchen station dispatcher
#[derive(Parser)]
#[command(name = "bistro")]
#[command(version, about = "bistro - kitchen station dispatcher")]
#[command(long_about = r#"
bistro loads a kitchen description (menu, stations, backup supplies and
orders) and dispatches every queued order across the stations in order,
topping stations up from the backup supplies when they run short.

COMMANDS:
  run     → Dispatch all queued orders and print the progress report
  check   → Validate a kitchen file and summarize it
  sample  → Print a sample kitchen file

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Dishes left unprepared
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch every queued order
    Run(run::RunArgs),

    /// Validate a kitchen file
    Check(check::CheckArgs),

    /// Print a sample kitchen file
    Sample(sample::SampleArgs),
}

/// Returned by `run` when orders remain on the queue after the pass.
#[derive(Debug)]
pub struct UnpreparedDishes(pub usize);

impl std::fmt::Display for UnpreparedDishes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} dishes were not prepared", self.0)
    }
}

impl std::error::Error for UnpreparedDishes {}

/// Read and parse a kitchen file.
pub fn load_config(path: &Path) -> Result<KitchenConfig> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read kitchen file {}", path.display()))?;
    let config = KitchenConfig::from_yaml_str(&yaml)
        .with_context(|| format!("Failed to parse kitchen file {}", path.display()))?;
    Ok(config)
}
