use thiserror::Error;

#[derive(Error, Debug)]
pub enum HcamError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Readout mode {0:?} not recognised")]
    InvalidMode(String),

    #[error("Readout speed {0:?} not recognised")]
    InvalidReadoutSpeed(String),

    #[error("Filter {0:?} not recognised")]
    InvalidFilter(String),

    #[error("Moon phase {0:?} not recognised")]
    InvalidMoonPhase(String),

    #[error("Degenerate window geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown telescope: {0}")]
    UnknownTelescope(String),

    #[error("Window {index} out of bounds: {reason}")]
    WindowOutOfBounds { index: usize, reason: String },

    #[error("Windows {first} and {second} overlap")]
    WindowsOverlap { first: usize, second: usize },

    #[error("Binning factor {factor} not allowed along {axis}")]
    InvalidBinning { axis: char, factor: u32 },

    #[error("Window {index} size {size} along {axis} is not a multiple of the binning factor {bin}")]
    BinningMismatch {
        index: usize,
        axis: char,
        size: u32,
        bin: u32,
    },

    #[error("{mode} mode needs {expected} window pair(s), got {actual}")]
    WindowCount {
        mode: String,
        expected: String,
        actual: usize,
    },

    #[error("{name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, HcamError>;
