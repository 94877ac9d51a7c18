use std::path::PathBuf;

use thiserror::Error;

use crate::types::City;

/// Convenience result type used across loading, filtering and statistics.
pub type BikeshareResult<T> = Result<T, BikeshareError>;

/// Error type returned by the trip pipeline.
///
/// A single enum is shared by loading, filtering, statistics and configuration. Every failure is
/// terminal for the current analysis; callers decide whether to re-prompt or abort.
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// The city's source file is missing or unreadable.
    #[error("data unavailable for {city}: cannot read {}: {source}", .path.display())]
    DataUnavailable {
        city: City,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A city/month/day value outside its enumerated domain.
    #[error("invalid filter: {message}")]
    InvalidFilter { message: String },

    /// A statistic was requested over zero rows (or zero non-missing values).
    #[error("empty table: cannot compute {statistic} over zero rows")]
    EmptyTable { statistic: &'static str },

    /// The CSV does not carry a required column.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be parsed into the type its column requires.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// CSV reader error after the file was opened.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error (terminal input/output, log files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("config error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
}

impl BikeshareError {
    pub(crate) fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }
}
