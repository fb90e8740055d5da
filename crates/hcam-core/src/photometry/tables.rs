//! Telescope and site lookup tables for the count estimator.
//!
//! These are read-only inputs owned by whoever loads the instrument
//! definitions; the estimator only borrows them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::GAUSSIAN_FWHM_PER_SIGMA;
use crate::error::{HcamError, Result};

use super::conditions::{Filter, MoonPhase};

/// One value per photometric band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerFilter {
    pub u: f64,
    pub g: f64,
    pub r: f64,
    pub i: f64,
    pub z: f64,
}

impl PerFilter {
    pub fn get(&self, filter: Filter) -> f64 {
        match filter {
            Filter::U => self.u,
            Filter::G => self.g,
            Filter::R => self.r,
            Filter::I => self.i,
            Filter::Z => self.z,
        }
    }
}

impl std::ops::Index<Filter> for PerFilter {
    type Output = f64;

    fn index(&self, filter: Filter) -> &f64 {
        match filter {
            Filter::U => &self.u,
            Filter::G => &self.g,
            Filter::R => &self.r,
            Filter::I => &self.i,
            Filter::Z => &self.z,
        }
    }
}

/// Telescope-specific photometric constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    pub name: String,
    /// Arcseconds per unbinned pixel.
    pub plate_scale: f64,
    /// Ratio of seeing FWHM to the Gaussian sigma of the PSF.
    #[serde(default = "default_efac")]
    pub efac: f64,
    /// Magnitude giving one electron per second, per band.
    pub zero_point: PerFilter,
}

fn default_efac() -> f64 {
    GAUSSIAN_FWHM_PER_SIGMA
}

impl InstrumentProfile {
    pub fn gtc() -> Self {
        Self {
            name: "GTC".into(),
            plate_scale: 0.081,
            efac: GAUSSIAN_FWHM_PER_SIGMA,
            zero_point: PerFilter {
                u: 28.15,
                g: 29.22,
                r: 28.78,
                i: 28.43,
                z: 27.94,
            },
        }
    }

    pub fn wht() -> Self {
        Self {
            name: "WHT".into(),
            plate_scale: 0.30,
            efac: GAUSSIAN_FWHM_PER_SIGMA,
            zero_point: PerFilter {
                u: 25.11,
                g: 26.79,
                r: 26.26,
                i: 25.71,
                z: 24.94,
            },
        }
    }
}

/// Sky surface brightness (mag / arcsec^2) per moon phase and band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyBrightness {
    pub dark: PerFilter,
    pub grey: PerFilter,
    pub bright: PerFilter,
}

impl SkyBrightness {
    pub fn get(&self, moon: MoonPhase, filter: Filter) -> f64 {
        match moon {
            MoonPhase::Dark => self.dark[filter],
            MoonPhase::Grey => self.grey[filter],
            MoonPhase::Bright => self.bright[filter],
        }
    }
}

impl Default for SkyBrightness {
    fn default() -> Self {
        Self {
            dark: PerFilter {
                u: 22.4,
                g: 22.2,
                r: 21.4,
                i: 20.7,
                z: 20.3,
            },
            grey: PerFilter {
                u: 21.4,
                g: 21.2,
                r: 20.4,
                i: 20.1,
                z: 19.9,
            },
            bright: PerFilter {
                u: 18.4,
                g: 18.2,
                r: 17.4,
                i: 17.9,
                z: 18.3,
            },
        }
    }
}

fn default_extinction() -> PerFilter {
    PerFilter {
        u: 0.50,
        g: 0.19,
        r: 0.09,
        i: 0.05,
        z: 0.04,
    }
}

/// Telescope profiles plus the site extinction and sky tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotometricTables {
    /// Extinction in magnitudes per airmass.
    #[serde(default = "default_extinction")]
    pub extinction: PerFilter,
    #[serde(default)]
    pub sky: SkyBrightness,
    pub profiles: Vec<InstrumentProfile>,
}

impl Default for PhotometricTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PhotometricTables {
    /// Tables for the telescopes the camera is known to mount on.
    pub fn builtin() -> Self {
        Self {
            extinction: default_extinction(),
            sky: SkyBrightness::default(),
            profiles: vec![InstrumentProfile::gtc(), InstrumentProfile::wht()],
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let tables = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            profiles = tables.profiles.len(),
            "Loaded photometric tables"
        );
        Ok(tables)
    }

    /// Look up a telescope profile by name, ignoring case.
    pub fn profile(&self, telescope: &str) -> Result<&InstrumentProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(telescope))
            .ok_or_else(|| HcamError::UnknownTelescope(telescope.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup_ignores_case() {
        let tables = PhotometricTables::builtin();
        assert_eq!(tables.profile("gtc").unwrap().plate_scale, 0.081);
        assert_eq!(tables.profile("WHT").unwrap().name, "WHT");
    }

    #[test]
    fn test_unknown_telescope() {
        let tables = PhotometricTables::builtin();
        assert!(matches!(
            tables.profile("NTT"),
            Err(HcamError::UnknownTelescope(_))
        ));
    }

    #[test]
    fn test_sky_brightens_with_moon() {
        let sky = SkyBrightness::default();
        for f in Filter::ALL {
            assert!(sky.get(MoonPhase::Dark, f) > sky.get(MoonPhase::Bright, f));
        }
    }
}
