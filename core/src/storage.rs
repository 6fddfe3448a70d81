use std::path::Path;

use log::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;

/// Leser analysekonfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg = AnalysisConfig::from_json_str(&contents)?;
        info!(
            "config loaded from {} (split_depth={}, grade_window={})",
            path.display(),
            cfg.split_depth,
            cfg.grade_window
        );
        Ok(cfg)
    } else {
        warn!("no config at {}, using defaults", path.display());
        Ok(AnalysisConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print). Ugyldig konfig skrives ikke.
pub fn save_config<P: AsRef<Path>>(cfg: &AnalysisConfig, path: P) -> Result<()> {
    cfg.validate()?;
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    info!("config saved to {}", path.display());
    Ok(())
}
