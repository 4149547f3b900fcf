//! Core record types, errors, and configuration for Chatscope
//!
//! This crate provides the foundational types shared by the transcript parser,
//! the aggregation routines and the command-line front end.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::ChatscopeConfig;
pub use error::{Error, Result};
pub use types::*;
