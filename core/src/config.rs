use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_SAMPLE_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_SPLIT_DEPTH: usize = 4;
pub const DEFAULT_GRADE_WINDOW: usize = 10;
/// 2^15 segmenter på dypeste nivå er mer enn nok for en økt.
pub const MAX_SPLIT_DEPTH: usize = 16;

/// Analyseparametre som ikke er rytterspesifikke.
///
/// Alle felt har default, så `{}` er en gyldig konfig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sekunder mellom samples. Leverandøren gir i praksis 1 Hz.
    pub sample_interval_secs: f64,
    /// Antall splittnivåer (1, 2, 4, … segmenter).
    pub split_depth: usize,
    /// Vindu (samples) for glidende median av stigning.
    pub grade_window: usize,
    /// Puls <= 0 er sensor-sentinel og behandles som manglende.
    pub filter_non_positive_hr: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
            split_depth: DEFAULT_SPLIT_DEPTH,
            grade_window: DEFAULT_GRADE_WINDOW,
            filter_non_positive_hr: true,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_interval_secs.is_finite() && self.sample_interval_secs > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "sample_interval_secs must be > 0, got {}",
                self.sample_interval_secs
            )));
        }
        if self.split_depth == 0 || self.split_depth > MAX_SPLIT_DEPTH {
            return Err(AnalysisError::InvalidConfig(format!(
                "split_depth must be in 1..={MAX_SPLIT_DEPTH}, got {}",
                self.split_depth
            )));
        }
        if self.grade_window == 0 {
            return Err(AnalysisError::InvalidConfig(
                "grade_window must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse + validering. Feil peker på JSON-stien.
    pub fn from_json_str(json_in: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(json_in);
        let cfg: AnalysisConfig = spte::deserialize(&mut de)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
