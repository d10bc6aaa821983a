//! Error types for the scanner boundary.
//!
//! The breakout core itself never fails; every variant here originates in the
//! request layer, the data adapters, or the report sink.

/// Top-level error type for breakscan.
#[derive(Debug, thiserror::Error)]
pub enum BreakscanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("no data found for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient data for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BreakscanError {
    pub fn missing(name: &str) -> Self {
        BreakscanError::MissingParameter {
            name: name.to_string(),
        }
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        BreakscanError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the caller asked for, as opposed to
    /// infrastructure failures. An unknown or unreadable ticker source counts
    /// as the caller's.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            BreakscanError::MissingParameter { .. }
                | BreakscanError::InvalidParameter { .. }
                | BreakscanError::NoData { .. }
                | BreakscanError::InsufficientData { .. }
                | BreakscanError::DataSource { .. }
        )
    }
}

impl From<&BreakscanError> for std::process::ExitCode {
    fn from(err: &BreakscanError) -> Self {
        let code: u8 = match err {
            BreakscanError::Io(_) | BreakscanError::Report(_) => 1,
            BreakscanError::ConfigParse { .. }
            | BreakscanError::ConfigMissing { .. }
            | BreakscanError::ConfigInvalid { .. } => 2,
            BreakscanError::DataSource { .. }
            | BreakscanError::Database { .. }
            | BreakscanError::DatabaseQuery { .. } => 3,
            BreakscanError::MissingParameter { .. } | BreakscanError::InvalidParameter { .. } => 4,
            BreakscanError::NoData { .. } | BreakscanError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
