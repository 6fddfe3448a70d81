use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

fn to_py_err(e: AnalysisError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn load_cfg(config_json: Option<&str>) -> PyResult<AnalysisConfig> {
    match config_json {
        Some(s) => AnalysisConfig::from_json_str(s).map_err(to_py_err),
        None => Ok(AnalysisConfig::default()),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// JSON inn / JSON ut (unngår pyo3 serde-feature)
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
#[pyo3(signature = (streams_json, request_json = None, config_json = None))]
fn analyze_streams_json(
    streams_json: &str,
    request_json: Option<&str>,
    config_json: Option<&str>,
) -> PyResult<String> {
    crate::analyzer::analyze_streams_json(streams_json, request_json, config_json).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (streams_json, config_json = None))]
fn best_efforts_json(streams_json: &str, config_json: Option<&str>) -> PyResult<String> {
    let cfg = load_cfg(config_json)?;
    let raw = crate::streams::parse_streams_json(streams_json).map_err(to_py_err)?;
    let table = crate::streams::normalize(&raw, &cfg).map_err(to_py_err)?;
    let efforts = crate::efforts::best_efforts(&table, &cfg);
    serde_json::to_string(&efforts).map_err(|e| to_py_err(e.into()))
}

/// FTP endres ofte i UI; egen rute som bare regner NP/IF/TSS på nytt.
#[pyfunction]
#[pyo3(signature = (streams_json, ftp, config_json = None))]
fn power_summary_json(streams_json: &str, ftp: f64, config_json: Option<&str>) -> PyResult<String> {
    let cfg = load_cfg(config_json)?;
    let raw = crate::streams::parse_streams_json(streams_json).map_err(to_py_err)?;
    let table = crate::streams::normalize(&raw, &cfg).map_err(to_py_err)?;
    let summary = crate::metrics::power_summary(&table, ftp, &cfg).map_err(to_py_err)?;
    serde_json::to_string(&summary).map_err(|e| to_py_err(e.into()))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn cyclestats_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_streams_json, m)?)?;
    m.add_function(wrap_pyfunction!(best_efforts_json, m)?)?;
    m.add_function(wrap_pyfunction!(power_summary_json, m)?)?;
    Ok(())
}
