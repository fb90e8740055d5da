use serde::{Deserialize, Serialize};

use crate::error::{HcamError, Result};

use super::config::{ReadoutMode, WindowPair};

/// A single rectangular readout window in 1-based unbinned detector pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub x_start: u32,
    pub y_start: u32,
    pub nx: u32,
    pub ny: u32,
}

impl Window {
    pub const fn new(x_start: u32, y_start: u32, nx: u32, ny: u32) -> Self {
        Self {
            x_start,
            y_start,
            nx,
            ny,
        }
    }
}

/// Quadrant layout used for full-frame timing, whatever the stored windows say.
///
/// The two halves of each output are read in sequence, so the same quadrant
/// rectangles appear twice.
pub const FULL_FRAME_WINDOWS: [Window; 4] = [
    Window::new(1, 1, 1023, 512),
    Window::new(1024, 513, 1023, 512),
    Window::new(1, 1, 1023, 512),
    Window::new(1024, 513, 1023, 512),
];

/// Window layout, tagged by readout mode.
///
/// Serialized as a `mode` string plus `pairs` (windows) or `pair` (drift).
/// The mode is parsed with [`ReadoutMode`]'s `FromStr`, so an unknown mode
/// reports [`HcamError::InvalidMode`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry", into = "RawGeometry")]
pub enum Geometry {
    #[default]
    FullFrame,
    /// One or two window pairs read out in order.
    Windows { pairs: Vec<WindowPair> },
    /// A single window pair continuously shifted through the storage area.
    Drift { pair: WindowPair },
}

#[derive(Serialize, Deserialize)]
struct RawGeometry {
    mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pairs: Option<Vec<WindowPair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pair: Option<WindowPair>,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = HcamError;

    fn try_from(raw: RawGeometry) -> Result<Self> {
        let mode: ReadoutMode = raw.mode.parse()?;
        match mode {
            ReadoutMode::FullFrame => Ok(Self::FullFrame),
            ReadoutMode::Windows => raw
                .pairs
                .map(|pairs| Self::Windows { pairs })
                .ok_or_else(|| HcamError::InvalidGeometry("Windows mode needs `pairs`".into())),
            ReadoutMode::Drift => raw
                .pair
                .map(|pair| Self::Drift { pair })
                .ok_or_else(|| HcamError::InvalidGeometry("Drift mode needs `pair`".into())),
        }
    }
}

impl From<Geometry> for RawGeometry {
    fn from(geometry: Geometry) -> Self {
        let mode = geometry.mode().to_string();
        match geometry {
            Geometry::FullFrame => Self {
                mode,
                pairs: None,
                pair: None,
            },
            Geometry::Windows { pairs } => Self {
                mode,
                pairs: Some(pairs),
                pair: None,
            },
            Geometry::Drift { pair } => Self {
                mode,
                pairs: None,
                pair: Some(pair),
            },
        }
    }
}

impl Geometry {
    pub fn mode(&self) -> ReadoutMode {
        match self {
            Self::FullFrame => ReadoutMode::FullFrame,
            Self::Windows { .. } => ReadoutMode::Windows,
            Self::Drift { .. } => ReadoutMode::Drift,
        }
    }

    /// Window pairs as configured. Empty for full frame.
    pub fn pairs(&self) -> &[WindowPair] {
        match self {
            Self::FullFrame => &[],
            Self::Windows { pairs } => pairs,
            Self::Drift { pair } => std::slice::from_ref(pair),
        }
    }

    /// Resolve into the ordered window sequence the readout walks through.
    ///
    /// Full frame yields [`FULL_FRAME_WINDOWS`]; windowed and drift layouts
    /// yield the left then right window of every pair.
    pub fn windows(&self) -> Vec<Window> {
        match self {
            Self::FullFrame => FULL_FRAME_WINDOWS.to_vec(),
            Self::Windows { .. } | Self::Drift { .. } => self
                .pairs()
                .iter()
                .flat_map(|p| [p.left(), p.right()])
                .collect(),
        }
    }
}
