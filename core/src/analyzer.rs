use log::{debug, info};
use serde_path_to_error as spte;

use crate::config::AnalysisConfig;
use crate::efforts::{best_efforts, power_to_weight};
use crate::error::{AnalysisError, Result};
use crate::gradient::gradient_bins;
use crate::metrics::{power_summary, ride_stats, validate_ftp};
use crate::splits::power_splits;
use crate::streams::{normalize, parse_streams_json};
use crate::types::{ActivityReport, AnalysisRequest, RawStreams};

impl AnalysisRequest {
    /// Strukturelle feil i forespørselen, sjekket før noe beregnes.
    pub fn validate(&self) -> Result<()> {
        if let Some(ftp) = self.ftp {
            validate_ftp(ftp)?;
        }
        if let Some(w) = self.weight_kg {
            if !(w.is_finite() && w > 0.0) {
                return Err(AnalysisError::InvalidWeight(w));
            }
        }
        Ok(())
    }
}

/// Kjører alle kalkulatorene på én normalisert tabell.
///
/// `summary` er kun med når FTP er oppgitt, `power_to_weight` kun når vekt
/// er oppgitt.
pub fn analyze_activity(
    raw: &RawStreams,
    request: &AnalysisRequest,
    cfg: &AnalysisConfig,
) -> Result<ActivityReport> {
    cfg.validate()?;
    request.validate()?;

    let table = normalize(raw, cfg)?;

    let efforts = best_efforts(&table, cfg);
    let power_to_weight = request
        .weight_kg
        .map(|w| power_to_weight(&efforts, w))
        .transpose()?;
    let summary = match request.ftp {
        Some(ftp) => power_summary(&table, ftp, cfg)?,
        None => None,
    };
    let splits = power_splits(&table, cfg.split_depth)?;
    let gradient_bins = gradient_bins(&table, cfg)?;

    info!(
        "analyzed {} samples: np={:?} gradient_bins={}",
        table.len(),
        summary.map(|s| s.normalized_power),
        gradient_bins.len()
    );

    Ok(ActivityReport {
        samples: table.len(),
        stats: ride_stats(&table),
        efforts,
        power_to_weight,
        summary,
        splits,
        gradient_bins,
    })
}

/// JSON inn, JSON ut: stream-payload fra leverandøren, valgfri forespørsel
/// (`{"ftp": 250, "weight_kg": 72}`) og valgfri konfig.
pub fn analyze_streams_json(
    streams_json: &str,
    request_json: Option<&str>,
    cfg_json: Option<&str>,
) -> Result<String> {
    let cfg = match cfg_json {
        Some(s) => AnalysisConfig::from_json_str(s)?,
        None => AnalysisConfig::default(),
    };
    let request: AnalysisRequest = match request_json {
        Some(s) => {
            let mut de = serde_json::Deserializer::from_str(s);
            spte::deserialize(&mut de)?
        }
        None => AnalysisRequest::default(),
    };
    debug!("analyze_streams_json: request={:?} cfg={:?}", request, cfg);

    let raw = parse_streams_json(streams_json)?;
    let report = analyze_activity(&raw, &request, &cfg)?;
    Ok(serde_json::to_string(&report)?)
}
