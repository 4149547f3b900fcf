//! Transcript parsing and chat statistics for Chatscope.
//!
//! This crate turns exported chat transcripts into a validated message table
//! and computes the descriptive statistics shown by the front ends.

#![deny(missing_docs, unsafe_code)]

/// Transcript parsers.
pub mod parsers;

/// Validated message table.
pub mod table;

/// Aggregations over the message table.
pub mod stats;

/// Tokenization, stop words, word and emoji frequencies.
pub mod nlp;

/// Bundled aggregation results for one user filter.
pub mod report;

/// Error types for analysis operations.
pub mod error;

/// Configuration for analysis modules.
pub mod config;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use parsers::{parse_transcript, ParseError};
pub use report::AnalysisReport;
pub use stats::Aggregator;
pub use table::MessageTable;
