use thiserror::Error;

/// Strukturelle feil som avbryter en hel forespørsel.
///
/// For lite data (kort økt, segment uten watt) er aldri en feil her – det
/// returneres som `None` i resultatet.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("missing required channel: {0}")]
    MissingRequiredChannel(&'static str),

    #[error("invalid FTP: {0} (must be a finite value > 0)")]
    InvalidFtp(f64),

    #[error("invalid body weight: {0} kg (must be a finite value > 0)")]
    InvalidWeight(f64),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("column '{channel}' has {actual} rows, table has {expected}")]
    ColumnLength {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<serde_path_to_error::Error<serde_json::Error>> for AnalysisError {
    fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        AnalysisError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    }
}
