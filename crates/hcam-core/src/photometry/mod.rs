pub mod conditions;
pub mod counts;
pub mod psf;
pub mod tables;

pub use conditions::{Filter, MoonPhase, ObservingConditions};
pub use counts::{compute_photometry, NoiseBudget, PhotometryParams, PhotometryResult, Photometer};
pub use tables::{InstrumentProfile, PerFilter, PhotometricTables, SkyBrightness};
