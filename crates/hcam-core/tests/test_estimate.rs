mod common;

use common::*;
use hcam_core::error::HcamError;
use hcam_core::estimate::{estimate, estimate_checked, EstimateConfig};
use hcam_core::instrument::ReadoutSpeed;
use hcam_core::photometry::{Photometer, PhotometricTables};
use hcam_core::timing::compute_timing;

#[test]
fn test_default_estimate() {
    let result = estimate_checked(&EstimateConfig::default()).unwrap();
    assert!(result.timing.cycle_time > 0.0);
    assert!(result.photometry.signal_to_noise > 0.0);
    assert!(result.photometry.signal_to_noise_3h >= result.photometry.signal_to_noise);
}

#[test]
fn test_estimate_matches_manual_pipeline() {
    let config = EstimateConfig {
        telescope: "wht".into(),
        conditions: conditions(19.0),
        instrument: windows(vec![pair(1, 1025, 1, 100, 100)], ReadoutSpeed::Fast, 0.2),
        ..Default::default()
    };
    let result = estimate(&config).unwrap();

    let tables = PhotometricTables::builtin();
    let photometer = Photometer::new(&tables, "WHT").unwrap();
    let timing = compute_timing(&config.instrument).unwrap();
    let photometry = photometer
        .compute(&timing, &config.instrument, &config.conditions)
        .unwrap();
    assert_eq!(result.timing, timing);
    assert_eq!(result.photometry, photometry);
}

#[test]
fn test_tables_override() {
    let config = EstimateConfig {
        telescope: "TEST".into(),
        conditions: conditions(17.0),
        instrument: full_frame(ReadoutSpeed::Slow, 2.0, true),
        tables: Some(flat_tables()),
        ..Default::default()
    };
    let result = estimate(&config).unwrap();
    let total = 10f64.powf((25.0 - 17.0 - 0.1) / 2.5) * 2.0 / 0.8;
    assert!((result.photometry.total_counts - total).abs() < 1e-9 * total);

    let missing = EstimateConfig {
        tables: None,
        ..config
    };
    assert!(matches!(
        estimate(&missing),
        Err(HcamError::UnknownTelescope(_))
    ));
}

#[test]
fn test_checked_rejects_invalid_instrument() {
    let config = EstimateConfig {
        instrument: windows(
            vec![pair(1, 1025, 1, 100, 100), pair(1, 1025, 50, 100, 100)],
            ReadoutSpeed::Fast,
            0.1,
        ),
        ..Default::default()
    };
    assert!(matches!(
        estimate_checked(&config),
        Err(HcamError::WindowsOverlap { .. })
    ));
    // The unchecked path still computes numbers for it.
    estimate(&config).unwrap();
}

#[test]
fn test_checked_rejects_invalid_conditions() {
    let mut config = EstimateConfig::default();
    config.conditions.airmass = 6.0;
    assert!(matches!(
        estimate_checked(&config),
        Err(HcamError::OutOfRange { .. })
    ));
}
