use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EXPOSURE_DELAY, GAIN_FAST, GAIN_MEDIUM, GAIN_SLOW, READ_NOISE_FAST,
    READ_NOISE_MEDIUM, READ_NOISE_SLOW, VIDEO_FAST, VIDEO_MEDIUM, VIDEO_SLOW,
};
use crate::error::{HcamError, Result};

use super::geometry::{Geometry, Window};

/// Readout topology of the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadoutMode {
    FullFrame,
    Windows,
    Drift,
}

impl std::fmt::Display for ReadoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullFrame => write!(f, "FullFrame"),
            Self::Windows => write!(f, "Windows"),
            Self::Drift => write!(f, "Drift"),
        }
    }
}

impl std::str::FromStr for ReadoutMode {
    type Err = HcamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fullframe" | "full" => Ok(Self::FullFrame),
            "windows" | "wins" => Ok(Self::Windows),
            "drift" => Ok(Self::Drift),
            _ => Err(HcamError::InvalidMode(s.to_string())),
        }
    }
}

/// Pixel readout speed. Selects the video period, gain and read noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReadoutSpeed {
    Fast,
    Medium,
    #[default]
    Slow,
}

/// Electronic characteristics associated with a readout speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadoutCharacteristics {
    /// Seconds to digitise one pixel.
    pub video_period: f64,
    /// Electrons per ADU.
    pub gain: f64,
    /// RMS read noise in electrons per pixel.
    pub read_noise: f64,
}

impl ReadoutSpeed {
    pub fn characteristics(self) -> ReadoutCharacteristics {
        match self {
            Self::Fast => ReadoutCharacteristics {
                video_period: VIDEO_FAST,
                gain: GAIN_FAST,
                read_noise: READ_NOISE_FAST,
            },
            Self::Medium => ReadoutCharacteristics {
                video_period: VIDEO_MEDIUM,
                gain: GAIN_MEDIUM,
                read_noise: READ_NOISE_MEDIUM,
            },
            Self::Slow => ReadoutCharacteristics {
                video_period: VIDEO_SLOW,
                gain: GAIN_SLOW,
                read_noise: READ_NOISE_SLOW,
            },
        }
    }

    pub fn video_period(self) -> f64 {
        self.characteristics().video_period
    }
}

impl std::fmt::Display for ReadoutSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "Fast"),
            Self::Medium => write!(f, "Medium"),
            Self::Slow => write!(f, "Slow"),
        }
    }
}

impl std::str::FromStr for ReadoutSpeed {
    type Err = HcamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "medium" => Ok(Self::Medium),
            "slow" => Ok(Self::Slow),
            _ => Err(HcamError::InvalidReadoutSpeed(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReadoutSpeed {
    type Error = HcamError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReadoutSpeed> for String {
    fn from(speed: ReadoutSpeed) -> Self {
        speed.to_string()
    }
}

/// A pair of windows sharing rows and size, one on each output half.
///
/// Coordinates are 1-based unbinned detector pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPair {
    /// First column of the left window (1..=1024).
    pub x_start_left: u32,
    /// First column of the right window (1025..=2048).
    pub x_start_right: u32,
    /// First row of both windows.
    pub y_start: u32,
    /// Columns per window.
    pub nx: u32,
    /// Rows per window.
    pub ny: u32,
}

impl WindowPair {
    pub fn left(&self) -> Window {
        Window {
            x_start: self.x_start_left,
            y_start: self.y_start,
            nx: self.nx,
            ny: self.ny,
        }
    }

    pub fn right(&self) -> Window {
        Window {
            x_start: self.x_start_right,
            y_start: self.y_start,
            nx: self.nx,
            ny: self.ny,
        }
    }
}

/// Snapshot of every instrument setting the timing and count models need,
/// plus the controller-only settings carried through to the detector setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Clear the chip before each exposure. Ignored in drift mode.
    #[serde(default)]
    pub clear: bool,
    #[serde(default)]
    pub readout_speed: ReadoutSpeed,
    /// Exposure delay in seconds.
    #[serde(default = "default_exposure_delay")]
    pub exposure_delay: f64,
    #[serde(default = "default_binning")]
    pub xbin: u32,
    #[serde(default = "default_binning")]
    pub ybin: u32,
    /// Include the overscan/prescan columns in the readout.
    #[serde(default)]
    pub overscan: bool,
    /// LED flash level, 0 disables the flash.
    #[serde(default)]
    pub led_setting: u32,
    /// Exposure multipliers for the u, g, r, i and z arms.
    #[serde(default = "default_multipliers")]
    pub multipliers: [u32; 5],
    pub geometry: Geometry,
}

fn default_exposure_delay() -> f64 {
    DEFAULT_EXPOSURE_DELAY
}
fn default_binning() -> u32 {
    1
}
fn default_multipliers() -> [u32; 5] {
    [1; 5]
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            clear: false,
            readout_speed: ReadoutSpeed::default(),
            exposure_delay: DEFAULT_EXPOSURE_DELAY,
            xbin: 1,
            ybin: 1,
            overscan: false,
            led_setting: 0,
            multipliers: default_multipliers(),
            geometry: Geometry::FullFrame,
        }
    }
}

impl InstrumentConfig {
    pub fn mode(&self) -> ReadoutMode {
        self.geometry.mode()
    }

    /// Whether the chip is actually cleared. Drift mode never clears,
    /// whatever `clear` says.
    pub fn clear_enabled(&self) -> bool {
        self.clear && self.mode() != ReadoutMode::Drift
    }

    /// Physical windows on the detector, left then right for each pair.
    pub fn windows(&self) -> Vec<Window> {
        self.geometry.windows()
    }
}
