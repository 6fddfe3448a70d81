//! Effekt- og pulsanalyse av aktivitetsstrømmer (1 Hz telemetri).
//!
//! Alle kalkulatorer er rene funksjoner over én [`NormalizedTable`]; ingen
//! delt tilstand, ingen cache.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod efforts;
pub mod error;
pub mod gradient;
pub mod metrics;
pub mod smoothing;
pub mod splits;
pub mod storage;
pub mod streams;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use analyzer::{analyze_activity, analyze_streams_json};
pub use config::AnalysisConfig;
pub use efforts::{best_effort_for, best_efforts, power_to_weight};
pub use error::{AnalysisError, Result};
pub use gradient::gradient_bins;
pub use metrics::{
    intensity_factor, normalized_power, power_summary, ride_stats, training_stress_score,
    variability_index,
};
pub use splits::{partition_sizes, power_splits};
pub use storage::{load_config, save_config};
pub use streams::{normalize, parse_streams_json};
pub use types::{
    ActivityReport, AnalysisRequest, Channel, EffortDuration, GradientBin, NormalizedTable,
    PowerSummary, RawStreams, RideStats, RollingEffortResult, Series, SplitLevel,
};
