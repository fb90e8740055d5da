//! Range, bounds, binning and overlap checks applied before a setup is used.
//!
//! The timing and count models assume their input already passed these
//! checks; they are kept separate so callers decide when to run them.

use crate::consts::{
    AIRMASS_RANGE, ALLOWED_BINNING, FFX, FFY, HALF_X, MAGNITUDE_RANGE, MAX_EXPOSURE_DELAY,
    MAX_LED_SETTING, MAX_MULTIPLIER, MIN_MULTIPLIER, SEEING_RANGE,
};
use crate::error::{HcamError, Result};
use crate::photometry::ObservingConditions;

use super::config::{InstrumentConfig, ReadoutMode, WindowPair};
use super::geometry::Window;

/// Whether two windows share any pixel.
pub fn overlap(a: &Window, b: &Window) -> bool {
    let end = |start: u32, size: u32| u64::from(start) + u64::from(size);
    u64::from(b.x_start) < end(a.x_start, a.nx)
        && end(b.x_start, b.nx) > u64::from(a.x_start)
        && u64::from(b.y_start) < end(a.y_start, a.ny)
        && end(b.y_start, b.ny) > u64::from(a.y_start)
}

/// Check an instrument setup. Returns the first problem found.
pub fn validate_instrument(config: &InstrumentConfig) -> Result<()> {
    check_range(
        "exposure delay",
        config.exposure_delay,
        0.0,
        MAX_EXPOSURE_DELAY,
    )?;
    check_binning('x', config.xbin)?;
    check_binning('y', config.ybin)?;

    if config.led_setting > MAX_LED_SETTING {
        return Err(out_of_range(
            "LED setting",
            config.led_setting as f64,
            0.0,
            MAX_LED_SETTING as f64,
        ));
    }
    for m in config.multipliers {
        if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&m) {
            return Err(out_of_range(
                "exposure multiplier",
                m as f64,
                MIN_MULTIPLIER as f64,
                MAX_MULTIPLIER as f64,
            ));
        }
    }

    let pairs = config.geometry.pairs();
    match config.mode() {
        ReadoutMode::FullFrame => return Ok(()),
        ReadoutMode::Windows if !(1..=2).contains(&pairs.len()) => {
            return Err(HcamError::WindowCount {
                mode: ReadoutMode::Windows.to_string(),
                expected: "1 or 2".into(),
                actual: pairs.len(),
            });
        }
        _ => {}
    }

    for (i, pair) in pairs.iter().enumerate() {
        check_pair_bounds(i, pair)?;
        check_pair_binning(i, pair, config.xbin, config.ybin)?;
    }

    let windows = config.windows();
    for i in 0..windows.len() {
        for j in (i + 1)..windows.len() {
            if overlap(&windows[i], &windows[j]) {
                return Err(HcamError::WindowsOverlap {
                    first: i + 1,
                    second: j + 1,
                });
            }
        }
    }
    Ok(())
}

/// Check the target and sky parameters fed to the count estimator.
pub fn validate_conditions(conditions: &ObservingConditions) -> Result<()> {
    check_range(
        "magnitude",
        conditions.magnitude,
        MAGNITUDE_RANGE.0,
        MAGNITUDE_RANGE.1,
    )?;
    check_range("seeing", conditions.seeing, SEEING_RANGE.0, SEEING_RANGE.1)?;
    check_range("airmass", conditions.airmass, AIRMASS_RANGE.0, AIRMASS_RANGE.1)
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    // Written so that NaN fails too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(out_of_range(name, value, min, max))
    }
}

fn out_of_range(name: &str, value: f64, min: f64, max: f64) -> HcamError {
    HcamError::OutOfRange {
        name: name.to_string(),
        value,
        min,
        max,
    }
}

fn check_binning(axis: char, factor: u32) -> Result<()> {
    if ALLOWED_BINNING.contains(&factor) {
        Ok(())
    } else {
        Err(HcamError::InvalidBinning { axis, factor })
    }
}

/// Last pixel covered by `size` pixels from `start`, widened so huge sizes
/// cannot wrap.
fn last_pixel(start: u32, size: u32) -> u64 {
    u64::from(start) + u64::from(size) - 1
}

fn check_pair_bounds(index: usize, pair: &WindowPair) -> Result<()> {
    let oob = |reason: String| HcamError::WindowOutOfBounds {
        index: index + 1,
        reason,
    };
    if pair.nx == 0 || pair.ny == 0 {
        return Err(oob(format!("size {}x{} is empty", pair.nx, pair.ny)));
    }
    let left_end = last_pixel(pair.x_start_left, pair.nx);
    if !(1..=HALF_X).contains(&pair.x_start_left) || left_end > u64::from(HALF_X) {
        return Err(oob(format!(
            "left window columns {}..{} not within 1..{}",
            pair.x_start_left, left_end, HALF_X
        )));
    }
    let right_end = last_pixel(pair.x_start_right, pair.nx);
    if !(HALF_X + 1..=FFX).contains(&pair.x_start_right) || right_end > u64::from(FFX) {
        return Err(oob(format!(
            "right window columns {}..{} not within {}..{}",
            pair.x_start_right,
            right_end,
            HALF_X + 1,
            FFX
        )));
    }
    let row_end = last_pixel(pair.y_start, pair.ny);
    if !(1..=FFY).contains(&pair.y_start) || row_end > u64::from(FFY) {
        return Err(oob(format!(
            "rows {}..{} not within 1..{}",
            pair.y_start, row_end, FFY
        )));
    }
    Ok(())
}

fn check_pair_binning(index: usize, pair: &WindowPair, xbin: u32, ybin: u32) -> Result<()> {
    if pair.nx % xbin != 0 {
        return Err(HcamError::BinningMismatch {
            index: index + 1,
            axis: 'x',
            size: pair.nx,
            bin: xbin,
        });
    }
    if pair.ny % ybin != 0 {
        return Err(HcamError::BinningMismatch {
            index: index + 1,
            axis: 'y',
            size: pair.ny,
            bin: ybin,
        });
    }
    Ok(())
}
