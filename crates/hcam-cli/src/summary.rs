use console::Style;
use hcam_core::estimate::{Estimate, EstimateConfig};
use hcam_core::instrument::{Geometry, InstrumentConfig};
use hcam_core::photometry::PhotometryResult;
use hcam_core::sweep::SweepPoint;
use hcam_core::timing::TimingResult;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    warn: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            warn: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
        }
    }

    fn peak(&self, result: &PhotometryResult) -> &Style {
        if result.saturated {
            &self.error
        } else if result.near_saturation {
            &self.warn
        } else {
            &self.value
        }
    }
}

/// Seconds with fewer decimals as the value grows, e.g. `0.00123` or `153`.
pub fn format_seconds(t: f64) -> String {
    if t < 0.01 {
        format!("{t:7.5}")
    } else if t < 0.1 {
        format!("{t:6.4}")
    } else if t < 1.0 {
        format!("{t:5.3}")
    } else if t < 10.0 {
        format!("{t:4.2}")
    } else if t < 100.0 {
        format!("{t:4.1}")
    } else if t < 1000.0 {
        format!("{t:4.0}")
    } else {
        format!("{t:5.0}")
    }
}

fn underline(s: &Styles, title: &str) {
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn print_instrument_section(s: &Styles, config: &InstrumentConfig) {
    println!("  {}", s.header.apply_to("Instrument"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(config.mode())
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Speed"),
        s.method.apply_to(config.readout_speed)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Binning"),
        s.value.apply_to(format!("{}x{}", config.xbin, config.ybin))
    );
    if config.clear_enabled() {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Clear"),
            s.value.apply_to("enabled")
        );
    } else {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Clear"),
            s.disabled.apply_to("disabled")
        );
    }
    match &config.geometry {
        Geometry::FullFrame => {}
        Geometry::Windows { pairs } => {
            for (i, p) in pairs.iter().enumerate() {
                println!(
                    "    {:<14}{}",
                    s.label.apply_to(format!("Pair {}", i + 1)),
                    s.value.apply_to(format!(
                        "xsl={} xsr={} ys={} {}x{}",
                        p.x_start_left, p.x_start_right, p.y_start, p.nx, p.ny
                    ))
                );
            }
        }
        Geometry::Drift { pair: p } => {
            println!(
                "    {:<14}{}",
                s.label.apply_to("Window"),
                s.value.apply_to(format!(
                    "xsl={} xsr={} ys={} {}x{}",
                    p.x_start_left, p.x_start_right, p.y_start, p.nx, p.ny
                ))
            );
        }
    }
    println!();
}

fn print_timing_section(s: &Styles, timing: &TimingResult) {
    println!("  {}", s.header.apply_to("Timing"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Exposure"),
        s.value.apply_to(format!("{} s", format_seconds(timing.exposure_time)))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Cycle"),
        s.value.apply_to(format!("{} s", format_seconds(timing.cycle_time)))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Dead time"),
        s.value.apply_to(format!("{} s", format_seconds(timing.dead_time)))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Frame rate"),
        s.value.apply_to(format!("{:.3} Hz", timing.frame_rate))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Duty cycle"),
        s.value.apply_to(format!("{:4.1} %", timing.duty_cycle))
    );
    if let Some(p) = timing.breakdown.pipeline {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Pipeline"),
            s.value.apply_to(format!(
                "{} windows, shift {} rows",
                p.stacked_windows, p.pipe_shift
            ))
        );
    }
    println!();
}

pub fn print_timing_summary(config: &InstrumentConfig, timing: &TimingResult) {
    let s = Styles::new();

    println!();
    underline(&s, "HiPERCAM Timing");
    print_instrument_section(&s, config);
    print_timing_section(&s, timing);
}

pub fn print_estimate_summary(config: &EstimateConfig, estimate: &Estimate) {
    let s = Styles::new();
    let cond = &config.conditions;
    let phot = &estimate.photometry;

    println!();
    underline(&s, "HiPERCAM Estimate");
    print_instrument_section(&s, &config.instrument);

    println!("  {}", s.header.apply_to("Target"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Telescope"),
        s.method.apply_to(&config.telescope)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Magnitude"),
        s.value.apply_to(format!("{} = {:.2}", cond.filter, cond.magnitude))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Seeing"),
        s.value.apply_to(format!("{:.2}\"", cond.seeing))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Airmass"),
        s.value.apply_to(format!("{:.2}", cond.airmass))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Moon"),
        s.value.apply_to(cond.moon)
    );
    println!();

    print_timing_section(&s, &estimate.timing);

    println!("  {}", s.header.apply_to("Counts"));
    let peak_note = if phot.saturated {
        " (saturated)"
    } else if phot.near_saturation {
        " (near saturation)"
    } else {
        ""
    };
    println!(
        "    {:<14}{}",
        s.label.apply_to("Peak"),
        s.peak(phot)
            .apply_to(format!("{} cts{}", phot.peak_counts.round() as i64, peak_note))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(format!("{} cts", phot.total_counts.round() as i64))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Sky/pixel"),
        s.value.apply_to(format!("{:.1} cts", phot.sky_per_pixel))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("S/N"),
        s.value.apply_to(format!("{:.1}", phot.signal_to_noise))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("S/N (3h)"),
        s.value.apply_to(format!("{:.1}", phot.signal_to_noise_3h))
    );
    println!();
}

pub fn print_sweep_table(config: &EstimateConfig, points: &[SweepPoint]) {
    let s = Styles::new();

    println!();
    underline(&s, "HiPERCAM Magnitude Sweep");
    if let Some(first) = points.first() {
        println!(
            "  {}  exposure {} s, cycle {} s, {} band, seeing {:.2}\"",
            s.label.apply_to(&config.telescope),
            format_seconds(first.timing.exposure_time),
            format_seconds(first.timing.cycle_time),
            config.conditions.filter,
            config.conditions.seeing,
        );
        println!();
    }

    println!(
        "  {}",
        s.header.apply_to(format!(
            "{:>6}  {:>10}  {:>12}  {:>8}  {:>8}",
            "Mag", "Peak", "Total", "S/N", "S/N 3h"
        ))
    );
    for point in points {
        let phot = &point.photometry;
        println!(
            "  {:>6.2}  {}  {:>12}  {:>8.1}  {:>8.1}",
            point.value,
            s.peak(phot)
                .apply_to(format!("{:>10}", phot.peak_counts.round() as i64)),
            phot.total_counts.round() as i64,
            phot.signal_to_noise,
            phot.signal_to_noise_3h,
        );
    }
    println!();
}
