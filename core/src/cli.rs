use std::fmt::Write;

use crate::types::{ActivityReport, EffortDuration};

const EMPTY_PLACEHOLDER: &str = "--";

fn fmt_opt(v: Option<f64>, dp: usize) -> String {
    match v {
        Some(x) => format!("{:.*}", dp, x),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

fn effort_title(d: EffortDuration) -> &'static str {
    match d {
        EffortDuration::TwentyMinute => "Twenty minutes",
        EffortDuration::TenMinute => "Ten minutes",
        EffortDuration::FiveMinute => "Five minutes",
        EffortDuration::OneMinute => "One minute",
        EffortDuration::ThirtySecond => "Thirty seconds",
        EffortDuration::FiveSecond => "Five seconds",
        EffortDuration::OneSecond => "One second",
    }
}

/// Tekstrapport for terminal. Manglende verdier vises som `--`.
pub fn render_report(report: &ActivityReport) -> String {
    let mut out = String::new();
    // skriving til String feiler ikke
    write_report(&mut out, report).ok();
    out
}

fn write_report(out: &mut String, report: &ActivityReport) -> std::fmt::Result {
    let s = &report.stats;
    writeln!(out, "--- Ride ---")?;
    writeln!(out, "Samples:          {}", report.samples)?;
    writeln!(out, "Duration (s):     {}", fmt_opt(s.duration_secs, 0))?;
    writeln!(out, "Avg/max power:    {} / {} W", fmt_opt(s.average_power, 1), fmt_opt(s.max_power, 0))?;
    writeln!(out, "Avg/max HR:       {} / {} bpm", fmt_opt(s.average_hr, 1), fmt_opt(s.max_hr, 0))?;
    writeln!(out, "Distance (m):     {}", fmt_opt(s.distance_m, 0))?;
    writeln!(out, "Elevation (m):    {}", fmt_opt(s.elevation_gain_m, 0))?;

    writeln!(out, "--- Best efforts ---")?;
    for (d, watts) in report.efforts.iter() {
        let wkg = report.power_to_weight.and_then(|p| p.get(d));
        writeln!(
            out,
            "{:<16}{:>8} W {:>7} W/kg",
            effort_title(d),
            fmt_opt(watts, 1),
            fmt_opt(wkg, 2)
        )?;
    }

    if let Some(p) = report.summary {
        writeln!(out, "--- Power summary ---")?;
        writeln!(out, "NP:  {:.1} W", p.normalized_power)?;
        writeln!(out, "IF:  {:.2}", p.intensity_factor)?;
        writeln!(out, "TSS: {:.1}", p.training_stress_score)?;
    }

    writeln!(out, "--- Splits ---")?;
    for level in &report.splits {
        let cells: Vec<String> = level.splits.iter().map(|v| fmt_opt(*v, 0)).collect();
        writeln!(out, "{:>3}: {}", level.split_count, cells.join(" "))?;
    }

    if !report.gradient_bins.is_empty() {
        writeln!(out, "--- Gradient ---")?;
        for b in &report.gradient_bins {
            writeln!(
                out,
                "{:>4}%  {:>6} W (max {:>4})  {:>6} bpm (max {:>4})  {:>6.0} s",
                b.grade,
                fmt_opt(b.power_mean, 1),
                fmt_opt(b.power_max, 0),
                fmt_opt(b.hr_mean, 1),
                fmt_opt(b.hr_max, 0),
                b.duration_secs
            )?;
        }
    }
    Ok(())
}

pub fn print_report(report: &ActivityReport) {
    print!("{}", render_report(report));
}
