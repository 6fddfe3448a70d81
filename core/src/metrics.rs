use log::debug;
use ordered_float::OrderedFloat;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::smoothing::{rolling_mean, window_samples};
use crate::types::{NormalizedTable, PowerSummary, RideStats};

/// Snitt av verdiene som finnes. `None` hvis ingen.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut cnt = 0usize;
    for v in values.iter().flatten() {
        sum += v;
        cnt += 1;
    }
    if cnt == 0 { None } else { Some(sum / cnt as f64) }
}

pub fn max_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().map(OrderedFloat).max().map(|m| m.0)
}

pub fn validate_ftp(ftp: f64) -> Result<()> {
    if ftp.is_finite() && ftp > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidFtp(ftp))
    }
}

/// Normalized Power:
/// 1) 30s rullende snitt av kraft (vinduer med dropout faller bort)
/// 2) ^4-middel over gyldige vinduer
/// 3) fjerderot
pub fn normalized_power(table: &NormalizedTable, cfg: &AnalysisConfig) -> Option<f64> {
    let window = window_samples(30.0, cfg.sample_interval_secs);
    let rolling30 = rolling_mean(table.power(), window);

    let mut fourth_power_sum = 0.0f64;
    let mut cnt = 0usize;
    for x in rolling30.into_iter().flatten() {
        fourth_power_sum += x.powf(4.0);
        cnt += 1;
    }
    if cnt == 0 {
        return None;
    }
    let max_pow = fourth_power_sum / cnt as f64;
    debug!("NP: {} rolling {}-sample windows", cnt, window);

    Some(max_pow.powf(0.25))
}

/// IF = NP/FTP
pub fn intensity_factor(np: f64, ftp: f64) -> f64 {
    np / ftp
}

/// TSS = (varighet_s * NP * IF) / (FTP * 36)
pub fn training_stress_score(duration_secs: f64, np: f64, intensity_factor: f64, ftp: f64) -> f64 {
    (duration_secs * np * intensity_factor) / (ftp * 36.0)
}

/// VI = NP / AvgPower
pub fn variability_index(np: Option<f64>, avg_p: Option<f64>) -> Option<f64> {
    match (np, avg_p) {
        (Some(n), Some(a)) if a > 0.0 => Some(n / a),
        _ => None,
    }
}

/// NP, IF og TSS for én FTP.
///
/// Ugyldig FTP er en feil; for lite watt-data (ingen hele 30 s-vinduer) eller
/// manglende tid gir `Ok(None)`.
pub fn power_summary(table: &NormalizedTable, ftp: f64, cfg: &AnalysisConfig) -> Result<Option<PowerSummary>> {
    validate_ftp(ftp)?;

    let Some(np) = normalized_power(table, cfg) else {
        return Ok(None);
    };
    let Some(duration_secs) = max_present(table.time()) else {
        return Ok(None);
    };

    let r_if = intensity_factor(np, ftp);
    let tss = training_stress_score(duration_secs, np, r_if, ftp);

    Ok(Some(PowerSummary {
        normalized_power: np,
        intensity_factor: r_if,
        training_stress_score: tss,
    }))
}

/// Høydemeter: sum av positive endringer mellom påfølgende gyldige samples.
fn elevation_gain(altitude: &[Option<f64>]) -> Option<f64> {
    let mut prev: Option<f64> = None;
    let mut gain = 0.0f64;
    let mut seen = false;
    for a in altitude.iter().flatten() {
        if let Some(p) = prev {
            if *a > p {
                gain += a - p;
            }
        }
        prev = Some(*a);
        seen = true;
    }
    seen.then_some(gain)
}

/// Enkle sammendrag for hele økten (snitt/maks ignorerer hull).
pub fn ride_stats(table: &NormalizedTable) -> RideStats {
    RideStats {
        duration_secs: max_present(table.time()),
        average_power: mean_present(table.power()),
        max_power: max_present(table.power()),
        average_hr: mean_present(table.hr()),
        max_hr: max_present(table.hr()),
        distance_m: max_present(table.distance()),
        elevation_gain_m: elevation_gain(table.altitude()),
    }
}
