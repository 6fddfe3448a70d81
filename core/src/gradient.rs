use std::collections::BTreeMap;

use log::debug;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::smoothing::rolling_median;
use crate::types::{GradientBin, NormalizedTable};

#[derive(Debug, Default)]
struct Aggregate {
    sum: f64,
    count: usize,
    max: Option<f64>,
}

impl Aggregate {
    fn push(&mut self, v: Option<f64>) {
        if let Some(x) = v {
            self.sum += x;
            self.count += 1;
            self.max = Some(self.max.map_or(x, |m| m.max(x)));
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct BinAccum {
    power: Aggregate,
    hr: Aggregate,
    rows: usize,
}

/// Effekt og puls gruppert på avrundet, median-glattet stigning.
///
/// Radene der medianen ikke er definert (de første `grade_window - 1`, eller
/// vinduer med hull i stigning) tas ikke med. Resultatet dekker hvert heltall
/// fra laveste til høyeste observerte bin; bins uten rader har bare `None`
/// og varighet 0.
pub fn gradient_bins(table: &NormalizedTable, cfg: &AnalysisConfig) -> Result<Vec<GradientBin>> {
    if cfg.grade_window == 0 {
        return Err(AnalysisError::InvalidConfig(
            "grade_window must be >= 1".into(),
        ));
    }

    let grade_rolling = rolling_median(table.grade(), cfg.grade_window);
    let power = table.power();
    let hr = table.hr();

    let mut groups: BTreeMap<i64, BinAccum> = BTreeMap::new();
    for (i, g) in grade_rolling.iter().enumerate() {
        let Some(g) = *g else { continue };
        // halv-til-partall, samme som dataframe-round
        let key = g.round_ties_even() as i64;
        let acc = groups.entry(key).or_default();
        acc.power.push(power[i]);
        acc.hr.push(hr[i]);
        acc.rows += 1;
    }

    let (Some(&lo), Some(&hi)) = (groups.keys().next(), groups.keys().next_back()) else {
        debug!("gradient bins: no rows with a defined rolling grade");
        return Ok(Vec::new());
    };
    debug!("gradient bins: {}..={} from {} observed bins", lo, hi, groups.len());

    let bins = (lo..=hi)
        .map(|grade| match groups.get(&grade) {
            Some(acc) => GradientBin {
                grade,
                power_mean: acc.power.mean(),
                power_max: acc.power.max,
                hr_mean: acc.hr.mean(),
                hr_max: acc.hr.max,
                duration_secs: acc.rows as f64 * cfg.sample_interval_secs,
            },
            None => GradientBin::empty(grade),
        })
        .collect();
    Ok(bins)
}
