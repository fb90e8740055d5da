use serde::{Deserialize, Serialize};

use crate::error::{HcamError, Result};

/// Photometric band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Filter {
    U,
    #[default]
    G,
    R,
    I,
    Z,
}

impl Filter {
    pub const ALL: [Filter; 5] = [Filter::U, Filter::G, Filter::R, Filter::I, Filter::Z];
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U => write!(f, "u"),
            Self::G => write!(f, "g"),
            Self::R => write!(f, "r"),
            Self::I => write!(f, "i"),
            Self::Z => write!(f, "z"),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = HcamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "u" | "U" => Ok(Self::U),
            "g" | "G" => Ok(Self::G),
            "r" | "R" => Ok(Self::R),
            "i" | "I" => Ok(Self::I),
            "z" | "Z" => Ok(Self::Z),
            _ => Err(HcamError::InvalidFilter(s.to_string())),
        }
    }
}

impl TryFrom<String> for Filter {
    type Error = HcamError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}

/// Moon contribution to the sky background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MoonPhase {
    #[default]
    Dark,
    Grey,
    Bright,
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Grey => write!(f, "grey"),
            Self::Bright => write!(f, "bright"),
        }
    }
}

impl std::str::FromStr for MoonPhase {
    type Err = HcamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "dark" => Ok(Self::Dark),
            "g" | "grey" | "gray" => Ok(Self::Grey),
            "b" | "bright" => Ok(Self::Bright),
            _ => Err(HcamError::InvalidMoonPhase(s.to_string())),
        }
    }
}

impl TryFrom<String> for MoonPhase {
    type Error = HcamError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MoonPhase> for String {
    fn from(moon: MoonPhase) -> Self {
        moon.to_string()
    }
}

/// Target and sky parameters for the count estimator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservingConditions {
    #[serde(default)]
    pub filter: Filter,
    /// Target magnitude in `filter`.
    pub magnitude: f64,
    /// Seeing FWHM in arcseconds.
    pub seeing: f64,
    pub airmass: f64,
    #[serde(default)]
    pub moon: MoonPhase,
}

impl Default for ObservingConditions {
    fn default() -> Self {
        Self {
            filter: Filter::G,
            magnitude: 18.0,
            seeing: 1.0,
            airmass: 1.5,
            moon: MoonPhase::Dark,
        }
    }
}
