//! Command-line interface for Chatscope.
//!
//! This crate reads exported chat transcripts, runs the parser and the
//! aggregations, and prints the results as text or JSON.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Plain-text rendering of analysis results.
pub mod render;

/// Error types for CLI operations.
pub mod error;
