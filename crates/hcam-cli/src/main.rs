mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hcam", about = "HiPERCAM exposure timing and signal-to-noise calculator")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show exposure, dead and cycle times for a setup
    Timing(commands::timing::TimingArgs),
    /// Estimate counts and signal-to-noise for a target
    Estimate(commands::estimate::EstimateArgs),
    /// Print the detector controller commands for a setup
    Setup(commands::setup::SetupArgs),
    /// Print or save a default estimate config
    Config(commands::config::ConfigArgs),
    /// Tabulate signal-to-noise over a range of magnitudes
    Sweep(commands::sweep::SweepArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Timing(args) => commands::timing::run(args),
        Commands::Estimate(args) => commands::estimate::run(args),
        Commands::Setup(args) => commands::setup::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Sweep(args) => commands::sweep::run(args),
    }
}
