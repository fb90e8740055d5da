#![allow(dead_code)]

use hcam_core::instrument::{Geometry, InstrumentConfig, ReadoutSpeed, WindowPair};
use hcam_core::photometry::{
    Filter, InstrumentProfile, MoonPhase, ObservingConditions, PerFilter, PhotometricTables,
    SkyBrightness,
};

pub const VCLOCK: f64 = 14.4e-6;
pub const HCLOCK: f64 = 0.48e-6;
pub const FFX: f64 = 2048.0;
pub const FFY: f64 = 1024.0;

/// Full-frame setup with the given speed, delay and clear flag.
pub fn full_frame(speed: ReadoutSpeed, delay: f64, clear: bool) -> InstrumentConfig {
    InstrumentConfig {
        clear,
        readout_speed: speed,
        exposure_delay: delay,
        geometry: Geometry::FullFrame,
        ..Default::default()
    }
}

pub fn pair(xsl: u32, xsr: u32, ys: u32, nx: u32, ny: u32) -> WindowPair {
    WindowPair {
        x_start_left: xsl,
        x_start_right: xsr,
        y_start: ys,
        nx,
        ny,
    }
}

pub fn windows(pairs: Vec<WindowPair>, speed: ReadoutSpeed, delay: f64) -> InstrumentConfig {
    InstrumentConfig {
        readout_speed: speed,
        exposure_delay: delay,
        geometry: Geometry::Windows { pairs },
        ..Default::default()
    }
}

pub fn drift(pair: WindowPair, speed: ReadoutSpeed, delay: f64) -> InstrumentConfig {
    InstrumentConfig {
        readout_speed: speed,
        exposure_delay: delay,
        geometry: Geometry::Drift { pair },
        ..Default::default()
    }
}

/// Simple round-number tables so expected values are easy to derive by hand.
pub fn flat_tables() -> PhotometricTables {
    let same = |v: f64| PerFilter {
        u: v,
        g: v,
        r: v,
        i: v,
        z: v,
    };
    PhotometricTables {
        extinction: same(0.1),
        sky: SkyBrightness {
            dark: same(22.0),
            grey: same(21.0),
            bright: same(19.0),
        },
        profiles: vec![InstrumentProfile {
            name: "TEST".into(),
            plate_scale: 0.1,
            efac: 2.3548,
            zero_point: same(25.0),
        }],
    }
}

pub fn conditions(magnitude: f64) -> ObservingConditions {
    ObservingConditions {
        filter: Filter::G,
        magnitude,
        seeing: 1.0,
        airmass: 1.0,
        moon: MoonPhase::Dark,
    }
}
