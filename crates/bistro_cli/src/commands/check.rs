//! Check command - Validate a kitchen file.

use std::path::PathBuf;

use anyhow::Result;
use bistro_core::{Kitchen, KitchenConfig};
use clap::Args;
use tracing::info;

use super::load_config;

#[derive(Args)]
pub struct CheckArgs {
    /// Kitchen file (YAML)
    #[arg(short, long)]
    pub kitchen: PathBuf,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    info!("Checking kitchen file: {}", args.kitchen.display());

    let config = load_config(&args.kitchen)?;
    config.validate()?;
    let kitchen = config.build()?;

    print!("{}", summarize(&config, &kitchen));
    Ok(())
}

fn summarize(config: &KitchenConfig, kitchen: &Kitchen) -> String {
    let mut out = String::new();

    out.push_str(&format!("Menu: {} dishes\n", config.menu.len()));

    out.push_str(&format!("Stations ({}):\n", kitchen.registry().len()));
    for (position, handle) in kitchen.registry().iter().enumerate() {
        let station = handle.read();
        out.push_str(&format!(
            "  {}. {} [{}]\n",
            position + 1,
            station.name(),
            station.assigned_dish_names().join(", ")
        ));
    }

    out.push_str(&format!("Backup ({}):\n", kitchen.backup().len()));
    for record in kitchen.backup().snapshot() {
        out.push_str(&format!("  {} x{} @ ${:.2}\n", record.name, record.quantity, record.price));
    }

    out.push_str(&format!("Queue ({}):\n", kitchen.queue().len()));
    for name in kitchen.queue().names() {
        out.push_str(&format!("  {}\n", name));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_sample() {
        let config = KitchenConfig::sample().unwrap();
        let kitchen = config.build().unwrap();

        let summary = summarize(&config, &kitchen);

        assert!(summary.starts_with("Menu: 5 dishes\nStations (5):\n"));
        assert!(summary.contains("  1. Grill Station [Grilled Chicken]\n"));
        assert!(summary.contains("  Spaghetti x5 @ $1.50\n"));
        assert!(summary.ends_with("  Beef Wellington\n"));
    }
}
