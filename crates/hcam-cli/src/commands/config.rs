use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hcam_core::estimate::EstimateConfig;
use hcam_core::photometry::PhotometricTables;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include the built-in photometric tables for editing
    #[arg(long)]
    pub with_tables: bool,
}

/// Print or save a full default EstimateConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = EstimateConfig {
        tables: args.with_tables.then(PhotometricTables::builtin),
        ..Default::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
