mod common;

use approx::assert_relative_eq;
use common::*;
use hcam_core::error::HcamError;
use hcam_core::instrument::ReadoutSpeed;
use hcam_core::timing::compute_timing;

// ---------------------------------------------------------------------------
// Full frame
// ---------------------------------------------------------------------------

#[test]
fn test_full_frame_slow_matches_hand_calculation() {
    let config = full_frame(ReadoutSpeed::Slow, 0.1, true);
    let t = compute_timing(&config).unwrap();

    let clear = 2.0 * (FFY * VCLOCK + 39e-6) + FFX * HCLOCK;
    let frame_transfer = (FFY - 35.0) * VCLOCK + 49e-6;
    let line_read = VCLOCK + FFX * HCLOCK + 11.2e-6 * 1023.0;
    let readout = 512.0 * line_read;
    // Quadrants start at rows 1, 513, 1, 513: only the third needs a shift
    // (back by 1024 rows) and therefore a line clear.
    let shifts = -1024.0 * VCLOCK + FFX * HCLOCK;
    let expected = 0.1 + clear + frame_transfer + 4.0 * readout + shifts;

    assert!(
        (t.cycle_time - expected).abs() < 1e-9,
        "cycle {} vs {}",
        t.cycle_time,
        expected
    );
    assert_eq!(t.breakdown.windows.len(), 4);
    assert_eq!(t.breakdown.windows[0].line_clear, 0.0);
    assert_eq!(t.breakdown.windows[1].line_clear, 0.0);
    assert!(t.breakdown.windows[2].line_clear > 0.0);
    assert_eq!(t.breakdown.windows[3].line_clear, 0.0);
}

#[test]
fn test_full_frame_is_deterministic() {
    let config = full_frame(ReadoutSpeed::Medium, 0.37, false);
    let a = compute_timing(&config).unwrap();
    let b = compute_timing(&config).unwrap();
    assert_eq!(a.cycle_time.to_bits(), b.cycle_time.to_bits());
    assert_eq!(a.exposure_time.to_bits(), b.exposure_time.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_full_frame_ignores_stored_windows() {
    // Any geometry tagged full frame reads the fixed quadrants.
    let a = compute_timing(&full_frame(ReadoutSpeed::Fast, 0.0, false)).unwrap();
    let mut config = full_frame(ReadoutSpeed::Fast, 0.0, false);
    config.overscan = true;
    config.led_setting = 100;
    let b = compute_timing(&config).unwrap();
    assert_eq!(a.cycle_time, b.cycle_time);
}

// ---------------------------------------------------------------------------
// Derived quantities
// ---------------------------------------------------------------------------

#[test]
fn test_frame_rate_and_duty_cycle() {
    for speed in [ReadoutSpeed::Fast, ReadoutSpeed::Medium, ReadoutSpeed::Slow] {
        for clear in [false, true] {
            let t = compute_timing(&full_frame(speed, 0.5, clear)).unwrap();
            assert_eq!(t.frame_rate, 1.0 / t.cycle_time);
            assert!(t.duty_cycle > 0.0 && t.duty_cycle <= 100.0);
            assert_eq!(t.dead_time, t.cycle_time - t.exposure_time);
        }
    }
}

#[test]
fn test_no_clear_exposes_during_readout() {
    let t = compute_timing(&full_frame(ReadoutSpeed::Slow, 0.2, false)).unwrap();
    assert!(!t.breakdown.clear_enabled);
    assert_eq!(t.breakdown.clear_time, 0.0);
    assert_eq!(t.exposure_time, t.cycle_time - t.breakdown.frame_transfer);
}

#[test]
fn test_clear_exposure_equals_delay() {
    let t = compute_timing(&full_frame(ReadoutSpeed::Slow, 0.2, true)).unwrap();
    assert!(t.breakdown.clear_enabled);
    assert_eq!(t.exposure_time, 0.2);
}

#[test]
fn test_exposure_delay_monotonic() {
    let base = compute_timing(&full_frame(ReadoutSpeed::Fast, 1.0, true)).unwrap();
    let longer = compute_timing(&full_frame(ReadoutSpeed::Fast, 3.5, true)).unwrap();
    assert!(longer.cycle_time > base.cycle_time);
    assert!(longer.exposure_time > base.exposure_time);
    assert_relative_eq!(longer.cycle_time - base.cycle_time, 2.5, epsilon = 1e-9);
    assert_relative_eq!(longer.exposure_time - base.exposure_time, 2.5, epsilon = 1e-12);
}

#[test]
fn test_faster_readout_is_quicker() {
    let fast = compute_timing(&full_frame(ReadoutSpeed::Fast, 0.0, false)).unwrap();
    let medium = compute_timing(&full_frame(ReadoutSpeed::Medium, 0.0, false)).unwrap();
    let slow = compute_timing(&full_frame(ReadoutSpeed::Slow, 0.0, false)).unwrap();
    assert!(fast.cycle_time < medium.cycle_time);
    assert!(medium.cycle_time < slow.cycle_time);
}

#[test]
fn test_binning_shortens_readout() {
    let unbinned = compute_timing(&full_frame(ReadoutSpeed::Slow, 0.0, false)).unwrap();
    let mut config = full_frame(ReadoutSpeed::Slow, 0.0, false);
    config.xbin = 2;
    config.ybin = 2;
    let binned = compute_timing(&config).unwrap();
    assert!(binned.cycle_time < unbinned.cycle_time);
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

#[test]
fn test_single_pair_matches_hand_calculation() {
    let config = windows(
        vec![pair(1, 1025, 1, 1024, 1024)],
        ReadoutSpeed::Medium,
        0.05,
    );
    let t = compute_timing(&config).unwrap();

    let frame_transfer = (FFY - 35.0) * VCLOCK + 49e-6;
    let line_read = VCLOCK + FFX * HCLOCK + 6.24e-6 * 1024.0;
    let readout = 1024.0 * line_read;
    // Right window of the pair shares rows with the left: shift back 1024 rows.
    let right_shift = -1024.0 * VCLOCK;
    let expected = 0.05 + frame_transfer + readout + (right_shift + FFX * HCLOCK + readout);

    assert_relative_eq!(t.cycle_time, expected, epsilon = 1e-12);
    assert_eq!(t.breakdown.windows.len(), 2);
    assert_eq!(t.breakdown.windows[0].shift, 0.0);
    assert_eq!(t.breakdown.windows[1].shift, right_shift);
    assert_eq!(t.exposure_time, t.cycle_time - frame_transfer);
}

#[test]
fn test_window_offset_adds_shift_and_line_clear() {
    let at_origin = windows(vec![pair(1, 1025, 1, 100, 100)], ReadoutSpeed::Fast, 0.0);
    let offset = windows(vec![pair(1, 1025, 101, 100, 100)], ReadoutSpeed::Fast, 0.0);
    let a = compute_timing(&at_origin).unwrap();
    let b = compute_timing(&offset).unwrap();
    let extra = 100.0 * VCLOCK + FFX * HCLOCK;
    assert_relative_eq!(b.cycle_time - a.cycle_time, extra, epsilon = 1e-12);
}

#[test]
fn test_two_pairs_shift_between_pairs() {
    let config = windows(
        vec![pair(1, 1025, 1, 100, 100), pair(1, 1025, 301, 100, 100)],
        ReadoutSpeed::Fast,
        0.0,
    );
    let t = compute_timing(&config).unwrap();
    let w = &t.breakdown.windows;
    assert_eq!(w.len(), 4);
    // Third window: 301 - 1 - 100 rows after the right window of pair one.
    assert_relative_eq!(w[2].shift, 200.0 * VCLOCK, epsilon = 1e-15);
    assert_eq!(w[3].shift, -100.0 * VCLOCK);
}

#[test]
fn test_empty_window_list_rejected() {
    let config = windows(vec![], ReadoutSpeed::Fast, 0.0);
    assert!(matches!(
        compute_timing(&config),
        Err(HcamError::InvalidGeometry(_))
    ));
}

#[test]
fn test_zero_height_window_rejected() {
    let config = windows(vec![pair(1, 1025, 1, 100, 0)], ReadoutSpeed::Fast, 0.0);
    assert!(matches!(
        compute_timing(&config),
        Err(HcamError::InvalidGeometry(_))
    ));
}

#[test]
fn test_zero_binning_rejected() {
    let mut config = full_frame(ReadoutSpeed::Fast, 0.0, false);
    config.ybin = 0;
    assert!(matches!(
        compute_timing(&config),
        Err(HcamError::InvalidGeometry(_))
    ));
}

// ---------------------------------------------------------------------------
// Drift
// ---------------------------------------------------------------------------

#[test]
fn test_drift_matches_hand_calculation() {
    let config = drift(pair(101, 1125, 11, 50, 50), ReadoutSpeed::Fast, 0.01);
    let t = compute_timing(&config).unwrap();

    let frame_transfer = (50.0 + 11.0 - 1.0) * VCLOCK + 49e-6;
    // 1037 / 50 = 20.74 -> (21.74 / 2) -> 10 stacked windows
    let pipe_shift = 1037.0 - 19.0 * 50.0;
    let shift = 10.0 * VCLOCK;
    let line_read = VCLOCK + FFX * HCLOCK + 3.2e-6 * 2.0 * 50.0;
    let readout = 50.0 * line_read;
    let expected =
        0.01 + frame_transfer + (pipe_shift * VCLOCK + shift + FFX * HCLOCK + readout);

    let p = t.breakdown.pipeline.unwrap();
    assert_eq!(p.stacked_windows, 10);
    assert_eq!(p.pipe_shift, 87);
    assert_relative_eq!(t.cycle_time, expected, epsilon = 1e-12);
    assert_relative_eq!(t.breakdown.frame_transfer, frame_transfer, epsilon = 1e-15);
    assert_eq!(t.breakdown.windows.len(), 1);
}

#[test]
fn test_drift_forces_clear_off() {
    let mut config = drift(pair(1, 1025, 1, 40, 40), ReadoutSpeed::Fast, 0.5);
    config.clear = true;
    let t = compute_timing(&config).unwrap();
    assert!(!config.clear_enabled());
    assert!(!t.breakdown.clear_enabled);
    assert_eq!(t.breakdown.clear_time, 0.0);
    assert_eq!(t.exposure_time, t.cycle_time - t.breakdown.frame_transfer);

    config.clear = false;
    let u = compute_timing(&config).unwrap();
    assert_eq!(t, u);
}

#[test]
fn test_drift_much_faster_than_full_frame() {
    let d = compute_timing(&drift(pair(1, 1025, 1, 40, 40), ReadoutSpeed::Fast, 0.0)).unwrap();
    let f = compute_timing(&full_frame(ReadoutSpeed::Fast, 0.0, false)).unwrap();
    assert!(d.frame_rate > 10.0 * f.frame_rate);
}

#[test]
fn test_drift_huge_window_does_not_overflow() {
    let config = drift(pair(1, 1025, 2, 10, u32::MAX), ReadoutSpeed::Fast, 0.0);
    let t = compute_timing(&config).unwrap();
    let expected = (u32::MAX as f64 + 1.0) * VCLOCK + 49e-6;
    assert_relative_eq!(t.breakdown.frame_transfer, expected, max_relative = 1e-12);
}
