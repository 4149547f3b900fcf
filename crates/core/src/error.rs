//! Error types for Chatscope core functionality.

use thiserror::Error;

/// Main error type for Chatscope.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File system error: {0}")]
    FileSystem(String),
    #[error("Data parsing error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
    /// Custom error with message.
    #[error("{0}")]
    Custom(String),
}

/// Result type for Chatscope operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Convenience trait for converting errors to core Error type
pub trait IntoCoreError<T> {
    /// Convert to core error with context
    fn with_context(self, context: &str) -> Result<T>;
}

impl<T, E> IntoCoreError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context(self, context: &str) -> Result<T> {
        self.map_err(|e| Error::Custom(format!("{}: {}", context, e)))
    }
}
