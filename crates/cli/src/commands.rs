//! CLI command definitions for Chatscope.
//!
//! Provides commands to analyze a transcript, list its senders and export
//! the parsed message table.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CLI_GIT_COMMIT"),
    ", built ",
    env!("CLI_BUILD_TIMESTAMP"),
    ")"
);

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "CHATSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print statistics for a transcript
    Analyze(AnalyzeArgs),

    /// List the sender choices of a transcript
    Users(UsersArgs),

    /// Export the parsed message table as JSON
    Parse(ParseArgs),
}

/// Where the message table comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Exported transcript file
    #[arg(required_unless_present = "table")]
    pub input: Option<PathBuf>,

    /// Previously exported JSON table instead of a transcript
    #[arg(long, conflicts_with = "input")]
    pub table: Option<PathBuf>,
}

/// Analysis arguments.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Message source
    #[command(flatten)]
    pub source: InputArgs,

    /// Sender to analyze, or "Overall" for everyone
    #[arg(short, long, default_value = "Overall")]
    pub user: String,

    /// Override the number of most common words
    #[arg(long)]
    pub top_words: Option<usize>,

    /// Override the number of busiest senders
    #[arg(long)]
    pub top_senders: Option<usize>,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Sender listing arguments.
#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Message source
    #[command(flatten)]
    pub source: InputArgs,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Table export arguments.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Exported transcript file
    pub input: PathBuf,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format options.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults_to_overall_text() {
        let cli = Cli::try_parse_from(["chatscope", "analyze", "chat.txt"]).unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.user, "Overall");
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.source.input, Some(PathBuf::from("chat.txt")));
    }

    #[test]
    fn table_source_replaces_transcript() {
        let cli = Cli::try_parse_from([
            "chatscope", "users", "--table", "rows.json", "--format", "json",
        ])
        .unwrap();
        let Commands::Users(args) = cli.command else {
            panic!("expected users");
        };
        assert!(args.source.input.is_none());
        assert_eq!(args.source.table, Some(PathBuf::from("rows.json")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn missing_source_is_rejected() {
        assert!(Cli::try_parse_from(["chatscope", "analyze"]).is_err());
    }
}
