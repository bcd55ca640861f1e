//! Sample command - Print a sample kitchen file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bistro_core::SAMPLE_KITCHEN_YAML;
use clap::Args;

#[derive(Args)]
pub struct SampleArgs {
    /// Write the sample to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SampleArgs) -> Result<()> {
    match args.output {
        Some(path) => {
            fs::write(&path, SAMPLE_KITCHEN_YAML)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote sample kitchen to {}", path.display());
        }
        None => print!("{}", SAMPLE_KITCHEN_YAML),
    }
    Ok(())
}
