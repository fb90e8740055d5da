//! Snapshot-in, numbers-out entry point: timing followed by counts.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::DEFAULT_TELESCOPE;
use crate::error::Result;
use crate::instrument::validate::{validate_conditions, validate_instrument};
use crate::instrument::InstrumentConfig;
use crate::photometry::{
    ObservingConditions, Photometer, PhotometricTables, PhotometryParams, PhotometryResult,
};
use crate::timing::{compute_timing, TimingResult};

/// Everything needed for one estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Profile name looked up in `tables`.
    #[serde(default = "default_telescope")]
    pub telescope: String,
    #[serde(default)]
    pub photometry: PhotometryParams,
    #[serde(default)]
    pub conditions: ObservingConditions,
    pub instrument: InstrumentConfig,
    /// Replaces the built-in tables when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<PhotometricTables>,
}

fn default_telescope() -> String {
    DEFAULT_TELESCOPE.to_string()
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            telescope: default_telescope(),
            photometry: PhotometryParams::default(),
            conditions: ObservingConditions::default(),
            instrument: InstrumentConfig::default(),
            tables: None,
        }
    }
}

impl EstimateConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub timing: TimingResult,
    pub photometry: PhotometryResult,
}

/// Run timing then photometry on an already validated configuration.
pub fn estimate(config: &EstimateConfig) -> Result<Estimate> {
    let builtin;
    let tables = match &config.tables {
        Some(t) => t,
        None => {
            builtin = PhotometricTables::builtin();
            &builtin
        }
    };
    let photometer = Photometer::new(tables, &config.telescope)?.with_params(config.photometry);

    let timing = compute_timing(&config.instrument)?;
    let photometry = photometer.compute(&timing, &config.instrument, &config.conditions)?;

    info!(
        telescope = %photometer.profile.name,
        mode = %config.instrument.mode(),
        cycle_time = timing.cycle_time,
        signal_to_noise = photometry.signal_to_noise,
        "Estimate complete"
    );
    Ok(Estimate { timing, photometry })
}

/// Validate the instrument and observing parameters, then [`estimate`].
pub fn estimate_checked(config: &EstimateConfig) -> Result<Estimate> {
    if let Err(e) = validate_instrument(&config.instrument) {
        warn!("Current instrument parameters are not valid: {e}");
        return Err(e);
    }
    if let Err(e) = validate_conditions(&config.conditions) {
        warn!("Current observing parameters are not valid: {e}");
        return Err(e);
    }
    estimate(config)
}
