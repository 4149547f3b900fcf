use crate::table::MessageTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Date-time prefix scanner.
pub mod lexer;

/// Parser for day-first WhatsApp-style exports.
pub mod whatsapp;

pub use whatsapp::WhatsAppParser;

/// Errors that can occur during transcript parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO operation error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// No date-time prefix anywhere in the input.
    #[error("Not a recognized transcript format: no date-time prefixes found")]
    NoMatch,
    /// Input file exceeds the configured import ceiling.
    #[error("Transcript too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Size of the rejected file.
        size: u64,
        /// Configured ceiling.
        limit: u64,
    },
}

/// Counters describing how a transcript was recovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Records produced.
    pub messages: usize,
    /// Records whose prefix could not be read as a timestamp.
    pub null_timestamps: usize,
    /// Records attributed to the notification sentinel.
    pub notifications: usize,
}

/// Output of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    /// Records in transcript order.
    pub table: MessageTable,
    /// Recovery counters.
    pub summary: ParseSummary,
}

/// Trait for transcript parsers.
pub trait ChatParser: Send + Sync {
    /// Returns the name of the parser.
    fn name(&self) -> &str;
    /// Check if this parser recognizes the given transcript text.
    fn can_parse(&self, text: &str) -> bool;
    /// Parse transcript text into structured records.
    fn parse(&self, text: &str) -> Result<ParsedTranscript, ParseError>;

    /// Read and parse a transcript file no larger than `max_bytes`.
    fn parse_file(&self, path: &Path, max_bytes: u64) -> Result<ParsedTranscript, ParseError> {
        let size = std::fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(ParseError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }
}

/// Parse raw transcript text with the default parser.
pub fn parse_transcript(raw: &str) -> Result<MessageTable, ParseError> {
    WhatsAppParser::new().parse(raw).map(|parsed| parsed.table)
}
