use anyhow::{Context, Result};
use clap::Args;
use hcam_core::estimate::{estimate, estimate_checked};

use super::{load_config, InstrumentArgs, TargetArgs};
use crate::summary::print_estimate_summary;

#[derive(Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Skip the instrument and observing parameter checks
    #[arg(long)]
    pub no_validate: bool,
}

pub fn run(args: &EstimateArgs) -> Result<()> {
    let config = load_config(&args.instrument, Some(&args.target))?;
    let result = if args.no_validate {
        estimate(&config)?
    } else {
        estimate_checked(&config).context("Invalid setup")?
    };
    print_estimate_summary(&config, &result);
    Ok(())
}
