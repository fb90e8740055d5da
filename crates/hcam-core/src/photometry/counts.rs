use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DARK_CURRENT, DEFAULT_APERTURE_SCALE, DEFAULT_PSF_SUBDIVISIONS, LONG_INTEGRATION_SECONDS,
    NEAR_SATURATION_ADU, SATURATION_ADU,
};
use crate::error::{HcamError, Result};
use crate::instrument::InstrumentConfig;
use crate::timing::TimingResult;

use super::conditions::ObservingConditions;
use super::psf::{aperture_fraction, peak_pixel_fraction};
use super::tables::{InstrumentProfile, PerFilter, PhotometricTables, SkyBrightness};

/// Tunable parameters of the count estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotometryParams {
    /// Aperture radius as a multiple of the seeing FWHM.
    #[serde(default = "default_aperture_scale")]
    pub aperture_scale: f64,
    /// PSF samples per unbinned pixel per axis.
    #[serde(default = "default_subdivisions")]
    pub subdivisions: u32,
}

fn default_aperture_scale() -> f64 {
    DEFAULT_APERTURE_SCALE
}
fn default_subdivisions() -> u32 {
    DEFAULT_PSF_SUBDIVISIONS
}

impl Default for PhotometryParams {
    fn default() -> Self {
        Self {
            aperture_scale: DEFAULT_APERTURE_SCALE,
            subdivisions: DEFAULT_PSF_SUBDIVISIONS,
        }
    }
}

/// Electron budget inside the aperture for one exposure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseBudget {
    pub signal: f64,
    pub sky: f64,
    pub dark: f64,
    /// Sum of read variances over the aperture pixels.
    pub read: f64,
    /// Combined Poisson and read noise.
    pub noise: f64,
}

/// Counts and signal-to-noise for a point source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotometryResult {
    /// Total source counts (ADU) before aperture losses.
    pub total_counts: f64,
    /// Counts in the brightest binned pixel (ADU).
    pub peak_counts: f64,
    pub saturated: bool,
    pub near_saturation: bool,
    pub signal_to_noise: f64,
    /// Signal-to-noise after three hours of back-to-back frames.
    pub signal_to_noise_3h: f64,
    /// Sky electrons per binned pixel.
    pub sky_per_pixel: f64,
    pub budget: NoiseBudget,
}

/// A telescope profile and site tables bound together for count estimates.
#[derive(Clone, Copy, Debug)]
pub struct Photometer<'a> {
    pub profile: &'a InstrumentProfile,
    pub extinction: &'a PerFilter,
    pub sky: &'a SkyBrightness,
    pub params: PhotometryParams,
}

impl<'a> Photometer<'a> {
    pub fn new(tables: &'a PhotometricTables, telescope: &str) -> Result<Self> {
        Ok(Self {
            profile: tables.profile(telescope)?,
            extinction: &tables.extinction,
            sky: &tables.sky,
            params: PhotometryParams::default(),
        })
    }

    pub fn with_params(mut self, params: PhotometryParams) -> Self {
        self.params = params;
        self
    }

    pub fn compute(
        &self,
        timing: &TimingResult,
        config: &InstrumentConfig,
        conditions: &ObservingConditions,
    ) -> Result<PhotometryResult> {
        compute_photometry(timing, config, conditions, self)
    }
}

/// Estimate source counts, peak level and signal-to-noise for one frame.
///
/// Uses the exposure and cycle times from `timing`, the binning and readout
/// speed from `config`. Fails only on inputs that make the model undefined
/// (zero binning, non-positive seeing or plate scale, zero subdivisions).
pub fn compute_photometry(
    timing: &TimingResult,
    config: &InstrumentConfig,
    conditions: &ObservingConditions,
    photometer: &Photometer<'_>,
) -> Result<PhotometryResult> {
    let profile = photometer.profile;
    let params = &photometer.params;

    if config.xbin == 0 || config.ybin == 0 || params.subdivisions == 0 {
        return Err(HcamError::InvalidGeometry(format!(
            "binning {}x{} with {} subdivisions",
            config.xbin, config.ybin, params.subdivisions
        )));
    }
    require_positive("seeing", conditions.seeing)?;
    require_positive("plate scale", profile.plate_scale)?;
    require_positive("efac", profile.efac)?;

    let readout = config.readout_speed.characteristics();
    let filter = conditions.filter;
    let zero = profile.zero_point[filter];
    let sky_mag = photometer.sky.get(conditions.moon, filter);
    let extinction = photometer.extinction[filter];
    let plate_scale = profile.plate_scale;
    let seeing = conditions.seeing;
    let exp_time = timing.exposure_time;
    let xbin = config.xbin as f64;
    let ybin = config.ybin as f64;

    // Source electrons above the atmosphere, dimmed by extinction.
    let total =
        10f64.powf((zero - conditions.magnitude - conditions.airmass * extinction) / 2.5) * exp_time;

    // Fraction landing in the central (binned) pixel, source centred on it.
    let sigma = seeing / profile.efac / plate_scale;
    let peak = total * peak_pixel_fraction(sigma, config.xbin, config.ybin, params.subdivisions);

    let correct = aperture_fraction(profile.efac, params.aperture_scale);

    let sky_per_arcsec = 10f64.powf((zero - sky_mag) / 2.5) * exp_time;
    let sky_per_pixel = sky_per_arcsec * plate_scale.powi(2) * xbin * ybin;
    let aperture_arcsec = PI * (params.aperture_scale * seeing).powi(2);
    let sky = sky_per_arcsec * aperture_arcsec;
    let npix = PI * (params.aperture_scale * seeing / plate_scale).powi(2) / xbin / ybin;

    let signal = correct * total;
    let dark = npix * DARK_CURRENT * exp_time;
    let read = npix * readout.read_noise.powi(2);
    let noise = (read + dark + sky + signal).sqrt();

    let signal_to_noise = signal / noise;
    let signal_to_noise_3h =
        signal / noise * (LONG_INTEGRATION_SECONDS / timing.cycle_time).sqrt();

    let total_counts = total / readout.gain;
    let peak_counts = peak / readout.gain;

    debug!(
        filter = %filter,
        magnitude = conditions.magnitude,
        total_counts,
        peak_counts,
        signal_to_noise,
        "Photometry computed"
    );

    Ok(PhotometryResult {
        total_counts,
        peak_counts,
        saturated: peak_counts > SATURATION_ADU,
        near_saturation: peak_counts > NEAR_SATURATION_ADU,
        signal_to_noise,
        signal_to_noise_3h,
        sky_per_pixel,
        budget: NoiseBudget {
            signal,
            sky,
            dark,
            read,
            noise,
        },
    })
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(HcamError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}
