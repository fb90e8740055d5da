use anyhow::{Context, Result};
use clap::Args;
use hcam_core::instrument::detector::{rtplot_windows, DetectorSetup};
use hcam_core::instrument::validate::validate_instrument;

use super::{load_config, InstrumentArgs};

#[derive(Args)]
pub struct SetupArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Also print the window list for the real-time plotter
    #[arg(long)]
    pub rtplot: bool,
}

pub fn run(args: &SetupArgs) -> Result<()> {
    let config = load_config(&args.instrument, None)?;
    validate_instrument(&config.instrument).context("Invalid instrument setup")?;
    let setup = DetectorSetup::from_config(&config.instrument)?;

    println!("{}", setup.setup_command());
    match setup.readmode_command() {
        Some(cmd) => println!("{cmd}"),
        None => eprintln!("No controller read mode for {} mode", config.instrument.mode()),
    }

    if args.rtplot {
        let windows = rtplot_windows(&config.instrument);
        if windows.is_empty() {
            println!("(full frame: no windows)");
        } else {
            println!("{}", windows.replace("\r\n", "\n"));
        }
    }
    Ok(())
}
