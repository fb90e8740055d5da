//! Batch evaluation of the timing and count models over a range of inputs.
//!
//! Each point is independent, so points are computed in parallel. Output order
//! matches input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::instrument::InstrumentConfig;
use crate::photometry::{ObservingConditions, Photometer, PhotometryResult};
use crate::timing::{compute_timing, TimingResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// The swept input value.
    pub value: f64,
    pub timing: TimingResult,
    pub photometry: PhotometryResult,
}

/// Counts and S/N over a list of target magnitudes. Timing is shared.
pub fn sweep_magnitudes(
    config: &InstrumentConfig,
    conditions: &ObservingConditions,
    photometer: &Photometer<'_>,
    magnitudes: &[f64],
) -> Result<Vec<SweepPoint>> {
    let timing = compute_timing(config)?;
    let points = magnitudes
        .par_iter()
        .map(|&magnitude| -> Result<SweepPoint> {
            let conditions = ObservingConditions {
                magnitude,
                ..conditions.clone()
            };
            let photometry = photometer.compute(&timing, config, &conditions)?;
            Ok(SweepPoint {
                value: magnitude,
                timing: timing.clone(),
                photometry,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(points = points.len(), "Magnitude sweep complete");
    Ok(points)
}

/// Timing, counts and S/N over a list of exposure delays.
pub fn sweep_exposure_delays(
    config: &InstrumentConfig,
    conditions: &ObservingConditions,
    photometer: &Photometer<'_>,
    delays: &[f64],
) -> Result<Vec<SweepPoint>> {
    let points = delays
        .par_iter()
        .map(|&exposure_delay| -> Result<SweepPoint> {
            let config = InstrumentConfig {
                exposure_delay,
                ..config.clone()
            };
            let timing = compute_timing(&config)?;
            let photometry = photometer.compute(&timing, &config, conditions)?;
            Ok(SweepPoint {
                value: exposure_delay,
                timing,
                photometry,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(points = points.len(), "Exposure delay sweep complete");
    Ok(points)
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(10.0, 20.0, 11);
        assert_eq!(v.len(), 11);
        assert_eq!(v[0], 10.0);
        assert!((v[10] - 20.0).abs() < 1e-12);
        assert!((v[3] - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }
}
