use log::debug;
use ordered_float::OrderedFloat;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::smoothing::{rolling_mean, window_samples};
use crate::types::{EffortDuration, NormalizedTable, RollingEffortResult};

/// Beste glidende snitteffekt for en vilkårlig varighet (sekunder).
///
/// `None` når økten er kortere enn vinduet, eller når alle vinduer
/// inneholder dropout – aldri 0.
pub fn best_effort_for(table: &NormalizedTable, duration_secs: f64, cfg: &AnalysisConfig) -> Option<f64> {
    let window = window_samples(duration_secs, cfg.sample_interval_secs);
    if table.len() < window {
        return None;
    }
    rolling_mean(table.power(), window)
        .into_iter()
        .flatten()
        .map(OrderedFloat)
        .max()
        .map(|best| best.0)
}

/// Beste effort for 20 min, 10 min, 5 min, 1 min, 30 s, 5 s og 1 s.
pub fn best_efforts(table: &NormalizedTable, cfg: &AnalysisConfig) -> RollingEffortResult {
    let mut out = RollingEffortResult::default();
    for d in EffortDuration::ALL {
        let best = best_effort_for(table, d.seconds(), cfg);
        debug!("best effort {}: {:?}", d.label(), best);
        out.set(d, best);
    }
    out
}

/// W/kg for hver effort.
pub fn power_to_weight(efforts: &RollingEffortResult, weight_kg: f64) -> Result<RollingEffortResult> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(AnalysisError::InvalidWeight(weight_kg));
    }
    let mut out = RollingEffortResult::default();
    for (d, watts) in efforts.iter() {
        out.set(d, watts.map(|w| w / weight_kg));
    }
    Ok(out)
}
