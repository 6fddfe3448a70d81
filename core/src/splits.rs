use log::debug;

use crate::config::MAX_SPLIT_DEPTH;
use crate::error::{AnalysisError, Result};
use crate::metrics::mean_present;
use crate::types::{NormalizedTable, SplitLevel};

/// Størrelser for `parts` sammenhengende grupper av `n` rader.
///
/// De første `n % parts` gruppene får én ekstra rad, slik at størrelsene
/// summerer til `n` og avviker med maks 1.
pub fn partition_sizes(n: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let base = n / parts;
    let extra = n % parts;
    (0..parts).map(|i| base + usize::from(i < extra)).collect()
}

/// Snitt per gruppe; tomme grupper og grupper med bare hull gir `None`.
pub fn split_means(values: &[Option<f64>], parts: usize) -> Vec<Option<f64>> {
    let mut start = 0usize;
    partition_sizes(values.len(), parts)
        .into_iter()
        .map(|size| {
            let group = &values[start..start + size];
            start += size;
            mean_present(group)
        })
        .collect()
}

/// Snitteffekt for 1, 2, 4, … 2^(depth-1) segmenter.
pub fn power_splits(table: &NormalizedTable, depth: usize) -> Result<Vec<SplitLevel>> {
    if depth == 0 || depth > MAX_SPLIT_DEPTH {
        return Err(AnalysisError::InvalidConfig(format!(
            "split depth must be in 1..={MAX_SPLIT_DEPTH}, got {depth}"
        )));
    }
    debug!("power splits: {} rows, depth {}", table.len(), depth);

    Ok((0..depth)
        .map(|k| {
            let split_count = 1usize << k;
            SplitLevel {
                split_count,
                splits: split_means(table.power(), split_count),
            }
        })
        .collect())
}
