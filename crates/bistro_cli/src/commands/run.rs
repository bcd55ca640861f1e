//! Run command - Dispatch every queued order.

use std::path::PathBuf;

use anyhow::Result;
use bistro_core::{DispatchReport, Kitchen};
use clap::Args;
use tracing::info;

use super::{load_config, UnpreparedDishes};

#[derive(Args)]
pub struct RunArgs {
    /// Kitchen file (YAML)
    #[arg(short, long)]
    pub kitchen: PathBuf,

    /// Move a station to the front of the dispatch order before dispatching
    #[arg(long, value_name = "STATION")]
    pub front: Vec<String>,

    /// Merge SOURCE into TARGET before dispatching
    #[arg(long, num_args = 2, value_names = ["TARGET", "SOURCE"])]
    pub merge: Vec<String>,

    /// Print the report as JSON instead of the progress trace
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = load_config(&args.kitchen)?;
    let mut kitchen = config.build()?;

    let report = dispatch(&mut kitchen, &args)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }

    let remaining = kitchen.queue().len();
    if remaining > 0 {
        if !args.json {
            println!("\nStill queued:");
            print!("{}", kitchen.queue().render());
        }
        return Err(UnpreparedDishes(remaining).into());
    }
    Ok(())
}

/// Apply the requested registry edits, then run one dispatch pass.
fn dispatch(kitchen: &mut Kitchen, args: &RunArgs) -> Result<DispatchReport> {
    for pair in args.merge.chunks(2) {
        if let [target, source] = pair {
            info!("Merging {} into {}", source, target);
            kitchen.registry_mut().merge(target, source)?;
        }
    }

    for station in &args.front {
        info!("Moving {} to the front", station);
        kitchen.registry_mut().move_to_front(station)?;
    }

    Ok(kitchen.process_all())
}
