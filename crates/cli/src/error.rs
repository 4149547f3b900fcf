//! Error types for CLI operations.

use thiserror::Error;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] chatscope_core::Error),

    /// Parsing or aggregation failed.
    #[error(transparent)]
    Analysis(#[from] chatscope_analysis::AnalysisError),

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<chatscope_analysis::ParseError> for CliError {
    fn from(err: chatscope_analysis::ParseError) -> Self {
        CliError::Analysis(err.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
