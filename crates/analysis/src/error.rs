use crate::parsers::ParseError;
use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Transcript parsing failed as a whole.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// A table lacks a column every record needs.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    /// A cell holds a value of the wrong shape.
    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidColumn {
        /// Zero-based row index.
        row: usize,
        /// Column name.
        column: String,
        /// What was wrong with the value.
        reason: String,
    },
    /// The table payload is not a list of row objects.
    #[error("Invalid table: {0}")]
    InvalidTable(String),
    /// The aggregation is only defined for another user filter.
    #[error("Unsupported user filter: {0}")]
    UnsupportedFilter(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] chatscope_core::Error),
    /// I/O operation error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
