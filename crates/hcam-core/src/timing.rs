//! Frame cycle timing for the three readout topologies.
//!
//! Every frame is: optional clear, exposure delay, frame transfer into the
//! storage area, then for each window in readout order a vertical shift to
//! bring it to the serial register, a serial register flush if anything was
//! shifted, and the row-by-row readout of the window itself.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    CLEAR_OVERHEAD, DRIFT_PIPELINE_ROWS, FFX, FFY, FRAME_TRANSFER_OVERHEAD,
    FRAME_TRANSFER_SKIPPED_ROWS, HCLOCK, VCLOCK,
};
use crate::error::{HcamError, Result};
use crate::instrument::{Geometry, InstrumentConfig, Window};

/// Timing of one window's readout (seconds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowTiming {
    /// Vertical shift from the end of the previous window to this one.
    /// Negative when windows are read out of row order.
    pub shift: f64,
    /// Serial register flush, only paid after a non-zero shift.
    pub line_clear: f64,
    /// Time to shift, clock out and digitise one binned row.
    pub line_read: f64,
    /// Time to read every binned row of the window.
    pub readout: f64,
}

/// Drift-mode pipeline: how many windows sit in the storage area at once,
/// and the extra vertical clocks that keep every window's exposure equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftPipeline {
    pub stacked_windows: u32,
    /// In units of vertical clocks.
    pub pipe_shift: i64,
}

impl DriftPipeline {
    pub fn for_window_height(ny: u32) -> Result<Self> {
        if ny == 0 {
            return Err(HcamError::InvalidGeometry(
                "drift window height must be positive".into(),
            ));
        }
        let rows = DRIFT_PIPELINE_ROWS as f64;
        let stacked_windows = (((rows / ny as f64) + 1.0) / 2.0).floor() as u32;
        let pipe_shift =
            DRIFT_PIPELINE_ROWS as i64 - (2 * stacked_windows as i64 - 1) * ny as i64;
        Ok(Self {
            stacked_windows,
            pipe_shift,
        })
    }
}

/// Individual terms that add up to the cycle time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingBreakdown {
    /// Clearing actually performed (always false in drift mode).
    pub clear_enabled: bool,
    pub clear_time: f64,
    pub frame_transfer: f64,
    /// Present in drift mode only.
    pub pipeline: Option<DriftPipeline>,
    pub windows: Vec<WindowTiming>,
}

/// Per-frame timing. All durations in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingResult {
    pub exposure_time: f64,
    pub dead_time: f64,
    pub cycle_time: f64,
    /// Percentage of the cycle spent integrating.
    pub duty_cycle: f64,
    /// Frames per second.
    pub frame_rate: f64,
    pub breakdown: TimingBreakdown,
}

/// Time to clear the image and storage areas by vertical clocking, then
/// flush the serial register.
pub fn full_clear_time() -> f64 {
    2.0 * (FFY as f64 * VCLOCK + CLEAR_OVERHEAD) + FFX as f64 * HCLOCK
}

/// Compute frame timing for a validated instrument configuration.
///
/// Fails only on geometry that leaves the timing undefined (zero binning,
/// empty window list, zero-sized windows).
pub fn compute_timing(config: &InstrumentConfig) -> Result<TimingResult> {
    if config.xbin == 0 || config.ybin == 0 {
        return Err(HcamError::InvalidGeometry(format!(
            "binning {}x{} must be positive",
            config.xbin, config.ybin
        )));
    }

    let video = config.readout_speed.video_period();
    let clear_enabled = config.clear_enabled();
    let clear_time = if clear_enabled { full_clear_time() } else { 0.0 };

    // (window, number of windows digitised per row): drift reads the left
    // and right windows of its pair as one step.
    let (frame_transfer, pipeline, steps) = match &config.geometry {
        Geometry::Drift { pair } => {
            let window = pair.left();
            check_window(0, &window)?;
            let rows = u64::from(window.ny) + u64::from(window.y_start) - 1;
            let frame_transfer = rows as f64 * VCLOCK + FRAME_TRANSFER_OVERHEAD;
            let pipeline = DriftPipeline::for_window_height(window.ny)?;
            (frame_transfer, Some(pipeline), vec![(window, 2u32)])
        }
        Geometry::FullFrame | Geometry::Windows { .. } => {
            let windows = config.windows();
            if windows.is_empty() {
                return Err(HcamError::InvalidGeometry(
                    "no windows to read out".into(),
                ));
            }
            for (i, w) in windows.iter().enumerate() {
                check_window(i, w)?;
            }
            let frame_transfer = (FFY - FRAME_TRANSFER_SKIPPED_ROWS) as f64 * VCLOCK
                + FRAME_TRANSFER_OVERHEAD;
            let steps = windows.into_iter().map(|w| (w, 1u32)).collect::<Vec<_>>();
            (frame_transfer, None, steps)
        }
    };

    let xbin = config.xbin as f64;
    let ybin = config.ybin as f64;
    let mut previous: Option<Window> = None;
    let mut windows = Vec::with_capacity(steps.len());
    for (window, outputs) in steps {
        let rows = match previous {
            None => window.y_start as i64 - 1,
            Some(p) => window.y_start as i64 - p.y_start as i64 - p.ny as i64,
        };
        let shift = rows as f64 * VCLOCK;
        let line_clear = if shift != 0.0 {
            FFX as f64 * HCLOCK
        } else {
            0.0
        };
        let line_read = VCLOCK * ybin
            + FFX as f64 * HCLOCK
            + video * outputs as f64 * window.nx as f64 / xbin;
        let readout = (window.ny as f64 / ybin) * line_read;
        windows.push(WindowTiming {
            shift,
            line_clear,
            line_read,
            readout,
        });
        previous = Some(window);
    }

    let mut cycle_time = config.exposure_delay + clear_time + frame_transfer;
    match pipeline {
        Some(p) => {
            let w = &windows[0];
            cycle_time += p.pipe_shift as f64 * VCLOCK + w.shift + w.line_clear + w.readout;
        }
        None => {
            for w in &windows {
                cycle_time += w.shift + w.line_clear + w.readout;
            }
        }
    }

    let exposure_time = if clear_enabled {
        config.exposure_delay
    } else {
        // Without a clear the chip integrates while the previous frame reads out.
        cycle_time - frame_transfer
    };
    let dead_time = cycle_time - exposure_time;
    let duty_cycle = 100.0 * exposure_time / cycle_time;
    let frame_rate = 1.0 / cycle_time;

    debug!(
        mode = %config.mode(),
        speed = %config.readout_speed,
        cycle_time,
        exposure_time,
        duty_cycle,
        "Timing computed"
    );

    Ok(TimingResult {
        exposure_time,
        dead_time,
        cycle_time,
        duty_cycle,
        frame_rate,
        breakdown: TimingBreakdown {
            clear_enabled,
            clear_time,
            frame_transfer,
            pipeline,
            windows,
        },
    })
}

fn check_window(index: usize, window: &Window) -> Result<()> {
    if window.nx == 0 || window.ny == 0 {
        return Err(HcamError::InvalidGeometry(format!(
            "window {} is {}x{}",
            index + 1,
            window.nx,
            window.ny
        )));
    }
    Ok(())
}
