//! Detector controller parameters derived from an instrument setup, and the
//! window description sent to the real-time plotter.

use crate::consts::{DEFAULT_NUM_CLEARS, HALF_X};
use crate::error::Result;
use crate::timing::DriftPipeline;

use super::config::InstrumentConfig;
use super::geometry::Geometry;

/// Ordered list of `DET.*` parameters for the detector controller.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorSetup {
    params: Vec<(String, String)>,
    read_mode: Option<u32>,
}

fn push(params: &mut Vec<(String, String)>, key: impl Into<String>, value: String) {
    params.push((key.into(), value));
}

fn flag(on: bool) -> String {
    let value = if on { "T" } else { "F" };
    value.to_string()
}

impl DetectorSetup {
    pub fn from_config(config: &InstrumentConfig) -> Result<Self> {
        let mut params: Vec<(String, String)> = Vec::new();

        push(&mut params, "DET.BINX1", config.xbin.to_string());
        push(&mut params, "DET.BINY1", config.ybin.to_string());
        push(&mut params, "DET.CLRCCD", flag(config.clear_enabled()));
        push(&mut params, "DET.NCLRS", DEFAULT_NUM_CLEARS.to_string());
        push(&mut params, "DET.DUMMY", "0".to_string());
        push(&mut params, "DET.EXPLED", flag(config.led_setting != 0));
        push(&mut params, "DET.GPS", flag(true));
        push(&mut params, "DET.INCPRSCX", flag(config.overscan));
        for (i, m) in config.multipliers.iter().enumerate() {
            push(&mut params, format!("DET.NSKIPS{}", i + 1), m.saturating_sub(1).to_string());
        }
        push(&mut params, "DET.SEQ.DIT", config.exposure_delay.to_string());

        let read_mode = match &config.geometry {
            Geometry::FullFrame => Some(1),
            Geometry::Windows { pairs } => {
                for (i, p) in pairs.iter().enumerate() {
                    let n = i + 1;
                    push(&mut params, format!("DET.WIN{n}.NX"), p.nx.to_string());
                    push(&mut params, format!("DET.WIN{n}.NY"), p.ny.to_string());
                    push(&mut params, format!("DET.WIN{n}.XSE"), offset(p.x_start_left, 1));
                    push(&mut params, format!("DET.WIN{n}.XSF"), offset(p.x_start_right, HALF_X + 1));
                    push(&mut params, format!("DET.WIN{n}.XSG"), offset(p.x_start_right, HALF_X + 1));
                    push(&mut params, format!("DET.WIN{n}.XSH"), offset(p.x_start_left, 1));
                    push(&mut params, format!("DET.WIN{n}.YS"), offset(p.y_start, 1));
                }
                Some(if pairs.len() > 1 { 3 } else { 2 })
            }
            Geometry::Drift { pair } => {
                let pipeline = DriftPipeline::for_window_height(pair.ny)?;
                push(&mut params, "DET.WIN1.NX", pair.nx.to_string());
                push(&mut params, "DET.WIN1.NY", pair.ny.to_string());
                push(&mut params, "DET.WIN1.YS", offset(pair.y_start, 1));
                push(&mut params, "DET.WIN1.XSE", offset(pair.x_start_left, 1));
                push(&mut params, "DET.WIN1.XSF", offset(pair.x_start_right, HALF_X + 1));
                push(&mut params, "DET.WIN1.XSH", offset(pair.x_start_left, 1));
                push(&mut params, "DET.WIN1.XSG", offset(pair.x_start_right, HALF_X + 1));
                push(&mut params, "DET.WIN1.NW", pipeline.stacked_windows.to_string());
                push(&mut params, "DET.WIN1.PSH", pipeline.pipe_shift.to_string());
                // No controller read mode exists for drift yet.
                None
            }
        };

        Ok(Self { params, read_mode })
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn read_mode(&self) -> Option<u32> {
        self.read_mode
    }

    /// `setup KEY VALUE  KEY VALUE ...` as understood by the controller.
    pub fn setup_command(&self) -> String {
        let mut cmd = String::from("setup");
        for (key, value) in &self.params {
            cmd.push_str(&format!(" {key} {value} "));
        }
        cmd
    }

    pub fn readmode_command(&self) -> Option<String> {
        self.read_mode
            .map(|id| format!("setup DET.READ.CURID {id}"))
    }
}

/// Zero-based offset of a 1-based coordinate from the start of its half.
fn offset(value: u32, origin: u32) -> String {
    (value as i64 - origin as i64).to_string()
}

/// Window list in the plain-text form the real-time plotter asks for.
///
/// Empty for full frame. Otherwise a `xbin ybin nwin` header followed by one
/// `xstart ystart nx ny` line per window, lines separated by CRLF.
pub fn rtplot_windows(config: &InstrumentConfig) -> String {
    if matches!(config.geometry, Geometry::FullFrame) {
        return String::new();
    }
    let windows = config.windows();
    let mut lines = Vec::with_capacity(windows.len() + 1);
    lines.push(format!("{} {} {}", config.xbin, config.ybin, windows.len()));
    for w in &windows {
        lines.push(format!("{} {} {} {}", w.x_start, w.y_start, w.nx, w.ny));
    }
    lines.join("\r\n")
}
