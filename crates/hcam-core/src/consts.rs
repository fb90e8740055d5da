/// Vertical clock period: time to shift charge down by one row (seconds).
pub const VCLOCK: f64 = 14.4e-6;

/// Horizontal clock period: time to shift the serial register by one pixel (seconds).
pub const HCLOCK: f64 = 0.48e-6;

/// Video (digitisation) period per pixel at fast readout (seconds).
pub const VIDEO_FAST: f64 = 3.2e-6;

/// Video period per pixel at medium readout (seconds).
pub const VIDEO_MEDIUM: f64 = 6.24e-6;

/// Video period per pixel at slow readout (seconds).
pub const VIDEO_SLOW: f64 = 11.2e-6;

/// Gain at fast readout (electrons per ADU).
pub const GAIN_FAST: f64 = 0.8;

/// Gain at medium readout (electrons per ADU).
pub const GAIN_MEDIUM: f64 = 0.7;

/// Gain at slow readout (electrons per ADU).
pub const GAIN_SLOW: f64 = 0.8;

/// Read noise at fast readout (electrons per pixel).
pub const READ_NOISE_FAST: f64 = 3.8;

/// Read noise at medium readout (electrons per pixel).
pub const READ_NOISE_MEDIUM: f64 = 2.0;

/// Read noise at slow readout (electrons per pixel).
pub const READ_NOISE_SLOW: f64 = 1.0;

/// Dark current (electrons per pixel per second).
pub const DARK_CURRENT: f64 = 0.001;

/// Active columns of the sensor.
pub const FFX: u32 = 2048;

/// Active rows of the sensor.
pub const FFY: u32 = 1024;

/// Columns per output half. Left windows live in `1..=HALF_X`, right windows
/// in `HALF_X + 1..=FFX`.
pub const HALF_X: u32 = FFX / 2;

/// Rows not shifted during a full frame transfer. The controller moves 1037
/// rows (1024 active, 5 dark reference, 2 transition, 6 extra overscan), i.e.
/// `FFY - 35` clocks fewer than the storage area height would suggest.
pub const FRAME_TRANSFER_SKIPPED_ROWS: u32 = 35;

/// Fixed overhead added to every frame transfer (seconds).
pub const FRAME_TRANSFER_OVERHEAD: f64 = 49.0e-6;

/// Fixed overhead per vertical clear of image plus storage area (seconds).
pub const CLEAR_OVERHEAD: f64 = 39.0e-6;

/// Rows in the drift-mode pipeline used to compute the number of stacked
/// windows and the pipe shift.
///
/// Instrument-specific: carried over from the controller sequencer and not
/// derived from any sensor constant above. Revalidate against the hardware
/// documentation whenever the sequencer changes.
pub const DRIFT_PIPELINE_ROWS: u32 = 1037;

/// Upper limit on the exposure delay, set by the 16-bit delay timer (seconds).
pub const MAX_EXPOSURE_DELAY: f64 = 1677.7207;

/// Allowed binning factors along either axis.
pub const ALLOWED_BINNING: [u32; 5] = [1, 2, 3, 4, 8];

/// Largest LED flash setting accepted by the controller.
pub const MAX_LED_SETTING: u32 = 4095;

/// Allowed range of the per-filter exposure multipliers (nskips + 1).
pub const MIN_MULTIPLIER: u32 = 1;
pub const MAX_MULTIPLIER: u32 = 20;

/// Number of clears performed before each exposure when clearing is on.
pub const DEFAULT_NUM_CLEARS: u32 = 10;

/// Default exposure delay shown by the control panel (seconds).
pub const DEFAULT_EXPOSURE_DELAY: f64 = 0.1;

/// Aperture radius as a multiple of the seeing FWHM.
pub const DEFAULT_APERTURE_SCALE: f64 = 1.6;

/// Sub-samples per binned pixel unit, per axis, used when integrating the PSF.
pub const DEFAULT_PSF_SUBDIVISIONS: u32 = 5;

/// Peak level above which a warning is raised (ADU).
pub const NEAR_SATURATION_ADU: f64 = 25_000.0;

/// Peak level above which the peak pixel is considered saturated (ADU).
pub const SATURATION_ADU: f64 = 60_000.0;

/// Ratio of FWHM to sigma for a Gaussian profile.
pub const GAUSSIAN_FWHM_PER_SIGMA: f64 = 2.3548;

/// Duration used for the long-integration signal-to-noise projection (seconds).
pub const LONG_INTEGRATION_SECONDS: f64 = 3.0 * 3600.0;

/// Accepted magnitude range for the count estimator.
pub const MAGNITUDE_RANGE: (f64, f64) = (0.0, 30.0);

/// Accepted seeing range (arcsec FWHM).
pub const SEEING_RANGE: (f64, f64) = (0.2, 20.0);

/// Accepted airmass range.
pub const AIRMASS_RANGE: (f64, f64) = (1.0, 5.0);

/// Telescope used when none is specified.
pub const DEFAULT_TELESCOPE: &str = "GTC";
