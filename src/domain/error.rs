//! Domain error types.

/// Top-level error type for stockscore.
#[derive(Debug, thiserror::Error)]
pub enum StockscoreError {
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

    #[error("invalid symbol list: {reason}")]
    InvalidSymbol { reason: String },

    #[error("symbol universe is empty")]
    EmptyUniverse,

    #[error("fetch failed for batch {batch}: {reason}")]
    Fetch { batch: String, reason: String },

    #[error("could not decode provider data: {reason}")]
    Decode { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockscoreError> for std::process::ExitCode {
    fn from(err: &StockscoreError) -> Self {
        let code: u8 = match err {
            StockscoreError::Io(_) => 1,
            StockscoreError::ConfigParse { .. }
            | StockscoreError::ConfigMissing { .. }
            | StockscoreError::ConfigInvalid { .. } => 2,
            StockscoreError::Fetch { .. } | StockscoreError::Decode { .. } => 3,
            StockscoreError::InvalidSymbol { .. } | StockscoreError::EmptyUniverse => 5,
            StockscoreError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
