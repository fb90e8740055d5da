use anyhow::{bail, Context, Result};
use clap::Args;
use hcam_core::instrument::validate::{validate_conditions, validate_instrument};
use hcam_core::photometry::{Photometer, PhotometricTables};
use hcam_core::sweep::{linspace, sweep_magnitudes};

use super::{load_config, InstrumentArgs, TargetArgs};
use crate::summary::print_sweep_table;

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Brightest magnitude
    #[arg(long, default_value = "12")]
    pub from: f64,

    /// Faintest magnitude
    #[arg(long, default_value = "22")]
    pub to: f64,

    /// Number of magnitudes in the table
    #[arg(long, default_value = "11")]
    pub steps: usize,
}

pub fn run(args: &SweepArgs) -> Result<()> {
    if args.steps == 0 {
        bail!("--steps must be at least 1");
    }
    let config = load_config(&args.instrument, Some(&args.target))?;
    validate_instrument(&config.instrument).context("Invalid instrument setup")?;
    validate_conditions(&config.conditions).context("Invalid observing parameters")?;

    let builtin;
    let tables = match &config.tables {
        Some(t) => t,
        None => {
            builtin = PhotometricTables::builtin();
            &builtin
        }
    };
    let photometer = Photometer::new(tables, &config.telescope)?.with_params(config.photometry);
    let magnitudes = linspace(args.from, args.to, args.steps);
    let points = sweep_magnitudes(&config.instrument, &config.conditions, &photometer, &magnitudes)?;

    print_sweep_table(&config, &points);
    Ok(())
}
