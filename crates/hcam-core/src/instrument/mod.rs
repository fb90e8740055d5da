pub mod config;
pub mod detector;
pub mod geometry;
pub mod validate;

pub use config::{InstrumentConfig, ReadoutMode, ReadoutSpeed, WindowPair};
pub use geometry::{Geometry, Window};
