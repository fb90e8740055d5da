pub mod config;
pub mod estimate;
pub mod setup;
pub mod sweep;
pub mod timing;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use hcam_core::estimate::EstimateConfig;
use hcam_core::instrument::{Geometry, ReadoutSpeed, WindowPair};
use hcam_core::photometry::{Filter, MoonPhase, PhotometricTables};
use tracing::debug;

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    FullFrame,
    Windows,
    Drift,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SpeedArg {
    Fast,
    Medium,
    Slow,
}

impl From<SpeedArg> for ReadoutSpeed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Fast => ReadoutSpeed::Fast,
            SpeedArg::Medium => ReadoutSpeed::Medium,
            SpeedArg::Slow => ReadoutSpeed::Slow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    U,
    G,
    R,
    I,
    Z,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::U => Filter::U,
            FilterArg::G => Filter::G,
            FilterArg::R => Filter::R,
            FilterArg::I => Filter::I,
            FilterArg::Z => Filter::Z,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoonArg {
    Dark,
    Grey,
    Bright,
}

impl From<MoonArg> for MoonPhase {
    fn from(arg: MoonArg) -> Self {
        match arg {
            MoonArg::Dark => MoonPhase::Dark,
            MoonArg::Grey => MoonPhase::Grey,
            MoonArg::Bright => MoonPhase::Bright,
        }
    }
}

/// Instrument settings shared by every command that needs a setup.
#[derive(Args)]
pub struct InstrumentArgs {
    /// Estimate config file (TOML); flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Readout mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Readout speed
    #[arg(long, value_enum)]
    pub speed: Option<SpeedArg>,

    /// Exposure delay in seconds
    #[arg(long)]
    pub delay: Option<f64>,

    /// Binning factor for both axes
    #[arg(long)]
    pub bin: Option<u32>,

    /// Clear the chip before each exposure
    #[arg(long, conflicts_with = "no_clear")]
    pub clear: bool,

    /// Do not clear the chip, even if the config file asks for it
    #[arg(long)]
    pub no_clear: bool,

    /// Window pair as XSL,XSR,YS,NX,NY (repeat for a second pair)
    #[arg(long = "window", value_parser = parse_window_pair)]
    pub windows: Vec<WindowPair>,
}

/// Target and sky settings for the count estimate.
#[derive(Args)]
pub struct TargetArgs {
    /// Telescope profile name
    #[arg(long)]
    pub telescope: Option<String>,

    /// Filter
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Target magnitude
    #[arg(long)]
    pub mag: Option<f64>,

    /// Seeing FWHM in arcseconds
    #[arg(long)]
    pub seeing: Option<f64>,

    /// Airmass
    #[arg(long)]
    pub airmass: Option<f64>,

    /// Moon phase
    #[arg(long, value_enum)]
    pub moon: Option<MoonArg>,

    /// Photometric tables file (TOML) replacing the built-in values
    #[arg(long)]
    pub tables: Option<PathBuf>,
}

fn parse_window_pair(s: &str) -> std::result::Result<WindowPair, String> {
    let values: Vec<u32> = s
        .split(',')
        .map(|v| v.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid window '{s}': {e}"))?;
    match values[..] {
        [x_start_left, x_start_right, y_start, nx, ny] => Ok(WindowPair {
            x_start_left,
            x_start_right,
            y_start,
            nx,
            ny,
        }),
        _ => Err(format!("invalid window '{s}': expected XSL,XSR,YS,NX,NY")),
    }
}

/// Build the estimate config from an optional file plus command-line overrides.
pub fn load_config(
    instrument: &InstrumentArgs,
    target: Option<&TargetArgs>,
) -> Result<EstimateConfig> {
    let mut config = if let Some(ref path) = instrument.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        EstimateConfig::from_toml_str(&contents)
            .with_context(|| format!("Invalid estimate config {}", path.display()))?
    } else {
        EstimateConfig::default()
    };

    apply_instrument(&mut config, instrument)?;
    if let Some(target) = target {
        apply_target(&mut config, target)?;
    }
    debug!(
        mode = %config.instrument.mode(),
        speed = %config.instrument.readout_speed,
        telescope = %config.telescope,
        "Loaded estimate config"
    );
    Ok(config)
}

fn apply_instrument(config: &mut EstimateConfig, args: &InstrumentArgs) -> Result<()> {
    let inst = &mut config.instrument;
    if let Some(speed) = args.speed {
        inst.readout_speed = speed.into();
    }
    if let Some(delay) = args.delay {
        inst.exposure_delay = delay;
    }
    if let Some(bin) = args.bin {
        inst.xbin = bin;
        inst.ybin = bin;
    }
    if args.clear {
        inst.clear = true;
    } else if args.no_clear {
        inst.clear = false;
    }

    let mode = match (args.mode, args.windows.is_empty()) {
        (Some(mode), _) => mode,
        (None, false) => ModeArg::Windows,
        (None, true) => return Ok(()),
    };
    // Without --window, reuse the pairs already loaded from the config file.
    let pairs = if args.windows.is_empty() {
        inst.geometry.pairs().to_vec()
    } else {
        args.windows.clone()
    };
    inst.geometry = match mode {
        ModeArg::FullFrame => Geometry::FullFrame,
        ModeArg::Windows => {
            if pairs.is_empty() {
                bail!("Windows mode needs at least one --window");
            }
            Geometry::Windows { pairs }
        }
        ModeArg::Drift => match pairs[..] {
            [pair] => Geometry::Drift { pair },
            _ => bail!("Drift mode needs exactly one --window"),
        },
    };
    Ok(())
}

fn apply_target(config: &mut EstimateConfig, args: &TargetArgs) -> Result<()> {
    if let Some(ref telescope) = args.telescope {
        config.telescope = telescope.clone();
    }
    let cond = &mut config.conditions;
    if let Some(filter) = args.filter {
        cond.filter = filter.into();
    }
    if let Some(mag) = args.mag {
        cond.magnitude = mag;
    }
    if let Some(seeing) = args.seeing {
        cond.seeing = seeing;
    }
    if let Some(airmass) = args.airmass {
        cond.airmass = airmass;
    }
    if let Some(moon) = args.moon {
        cond.moon = moon.into();
    }
    if let Some(ref path) = args.tables {
        let tables = PhotometricTables::from_toml_file(path)
            .with_context(|| format!("Failed to load tables {}", path.display()))?;
        config.tables = Some(tables);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        instrument: InstrumentArgs,
    }

    fn parse(args: &[&str]) -> InstrumentArgs {
        let argv = std::iter::once("hcam").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().instrument
    }

    fn pair(y_start: u32) -> WindowPair {
        WindowPair {
            x_start_left: 1,
            x_start_right: 1025,
            y_start,
            nx: 50,
            ny: 50,
        }
    }

    #[test]
    fn test_parse_window_pair() {
        let pair = parse_window_pair("1, 1025,11,50,60").unwrap();
        assert_eq!(pair.x_start_left, 1);
        assert_eq!(pair.x_start_right, 1025);
        assert_eq!(pair.y_start, 11);
        assert_eq!((pair.nx, pair.ny), (50, 60));
        assert!(parse_window_pair("1,1025,11,50").is_err());
        assert!(parse_window_pair("1,1025,11,50,x").is_err());
    }

    #[test]
    fn test_no_clear_overrides_config() {
        let mut config = EstimateConfig::default();
        config.instrument.clear = true;
        apply_instrument(&mut config, &parse(&["--no-clear"])).unwrap();
        assert!(!config.instrument.clear);

        apply_instrument(&mut config, &parse(&["--clear"])).unwrap();
        assert!(config.instrument.clear);

        apply_instrument(&mut config, &parse(&[])).unwrap();
        assert!(config.instrument.clear);
    }

    #[test]
    fn test_clear_flags_conflict() {
        let argv = ["hcam", "--clear", "--no-clear"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_mode_reuses_config_pairs() {
        let mut config = EstimateConfig::default();
        config.instrument.geometry = Geometry::Windows {
            pairs: vec![pair(11)],
        };
        apply_instrument(&mut config, &parse(&["--mode", "drift"])).unwrap();
        assert_eq!(config.instrument.geometry, Geometry::Drift { pair: pair(11) });

        apply_instrument(&mut config, &parse(&["--mode", "windows"])).unwrap();
        assert_eq!(
            config.instrument.geometry,
            Geometry::Windows {
                pairs: vec![pair(11)]
            }
        );
    }

    #[test]
    fn test_window_flags_replace_config_pairs() {
        let mut config = EstimateConfig::default();
        config.instrument.geometry = Geometry::Windows {
            pairs: vec![pair(11), pair(201)],
        };
        let args = parse(&["--mode", "drift", "--window", "1,1025,101,50,50"]);
        apply_instrument(&mut config, &args).unwrap();
        assert_eq!(config.instrument.geometry, Geometry::Drift { pair: pair(101) });
    }

    #[test]
    fn test_mode_without_any_pairs_fails() {
        let mut config = EstimateConfig::default();
        assert!(apply_instrument(&mut config, &parse(&["--mode", "windows"])).is_err());
        assert!(apply_instrument(&mut config, &parse(&["--mode", "drift"])).is_err());
    }
}
