use anyhow::{Context, Result};
use clap::Args;
use hcam_core::instrument::validate::validate_instrument;
use hcam_core::timing::compute_timing;

use super::{load_config, InstrumentArgs};
use crate::summary::print_timing_summary;

#[derive(Args)]
pub struct TimingArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,
}

pub fn run(args: &TimingArgs) -> Result<()> {
    let config = load_config(&args.instrument, None)?;
    validate_instrument(&config.instrument).context("Invalid instrument setup")?;
    let timing = compute_timing(&config.instrument)?;
    print_timing_summary(&config.instrument, &timing);
    Ok(())
}
