//! CLI application entry point and configuration.
//!
//! This module provides the main CLI application logic, including argument parsing,
//! configuration loading, and command dispatch.

use crate::commands::{AnalyzeArgs, Cli, Commands, InputArgs, OutputFormat, ParseArgs, UsersArgs};
use crate::error::{CliError, Result};
use crate::render::render_report;
use chatscope_analysis::parsers::{ChatParser, WhatsAppParser};
use chatscope_analysis::{AnalysisConfig, AnalysisReport, Aggregator, MessageTable};
use chatscope_core::config::{LogFormat, LogLevel};
use chatscope_core::{ChatscopeConfig, UserFilter};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

/// Configuration for the CLI application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Path to configuration file.
    pub config_path: Option<PathBuf>,
    /// Logging verbosity level.
    pub verbosity: u8,
    /// Settings loaded from the configuration file.
    pub settings: ChatscopeConfig,
}

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Application configuration.
    pub config: AppConfig,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

/// Parse the command line and run the selected command.
pub fn run() -> Result<()> {
    App::new()?.run()
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already-parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { config, cli })
    }

    /// Load configuration from file.
    fn load_config(cli: &Cli) -> Result<AppConfig> {
        let mut config = AppConfig {
            verbosity: cli.verbose,
            ..AppConfig::default()
        };

        if let Some(config_path) = &cli.config {
            if !config_path.exists() {
                return Err(CliError::Argument(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            config.settings = ChatscopeConfig::load(config_path)?;
            config.config_path = Some(config_path.clone());
        } else {
            config.settings = ChatscopeConfig::load_or_default()?;
        }

        Ok(config)
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        self.setup_logging();

        match &self.cli.command {
            Commands::Analyze(args) => self.handle_analyze(args),
            Commands::Users(args) => self.handle_users(args),
            Commands::Parse(args) => self.handle_parse(args),
        }
    }

    /// Set up logging based on verbosity level and configured format.
    fn setup_logging(&self) {
        let level = match self.config.verbosity {
            0 => match self.config.settings.logging.level {
                LogLevel::Error => Level::ERROR,
                LogLevel::Warn => Level::WARN,
                LogLevel::Info => Level::INFO,
                LogLevel::Debug => Level::DEBUG,
                LogLevel::Trace => Level::TRACE,
            },
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        let builder = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr);

        // Ignore errors if a subscriber is already installed
        match self.config.settings.logging.format {
            LogFormat::Json => builder.json().try_init().ok(),
            LogFormat::Text => builder.try_init().ok(),
        };
    }

    fn analysis_config(&self) -> Result<AnalysisConfig> {
        Ok(AnalysisConfig::from_settings(
            &self.config.settings.analysis,
        )?)
    }

    fn load_table(&self, source: &InputArgs) -> Result<MessageTable> {
        match (&source.table, &source.input) {
            (Some(table_path), _) => {
                let content = fs::read_to_string(table_path)?;
                let table = MessageTable::from_json_str(&content)?;
                info!(
                    "Loaded {} records from {}",
                    table.len(),
                    table_path.display()
                );
                Ok(table)
            }
            (None, Some(input)) => self.parse_transcript_file(input),
            (None, None) => Err(CliError::Argument(
                "either a transcript or --table is required".to_string(),
            )),
        }
    }

    fn parse_transcript_file(&self, input: &Path) -> Result<MessageTable> {
        if !input.exists() {
            return Err(CliError::Argument(format!(
                "input path not found: {}",
                input.display()
            )));
        }
        let parser = WhatsAppParser::new();
        let parsed = parser.parse_file(input, self.config.settings.analysis.max_import_bytes)?;
        if parsed.summary.null_timestamps > 0 {
            warn!(
                "{} messages had unreadable timestamps and are left out of time-based views",
                parsed.summary.null_timestamps
            );
        }
        Ok(parsed.table)
    }

    fn handle_analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let table = self.load_table(&args.source)?;
        let mut analysis = self.analysis_config()?;
        if let Some(top_words) = args.top_words {
            analysis.top_words = top_words;
        }
        if let Some(top_senders) = args.top_senders {
            analysis.top_senders = top_senders;
        }

        let filter = UserFilter::from(args.user.as_str());
        if let UserFilter::Sender(name) = &filter {
            if !table.senders().iter().any(|sender| sender.as_str() == name) {
                warn!("No messages from '{}' in this transcript", name);
            }
        }

        let aggregator = Aggregator::new(&table, &analysis);
        let report = AnalysisReport::build(&aggregator, &filter)?;

        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print!("{}", render_report(&report)),
        }
        Ok(())
    }

    fn handle_users(&self, args: &UsersArgs) -> Result<()> {
        let table = self.load_table(&args.source)?;
        let options = table.sender_options();

        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
            OutputFormat::Text => {
                for option in options {
                    println!("{}", option);
                }
            }
        }
        Ok(())
    }

    fn handle_parse(&self, args: &ParseArgs) -> Result<()> {
        let table = self.parse_transcript_file(&args.input)?;
        let content = serde_json::to_string_pretty(&table.to_json_rows()?)?;

        match &args.output {
            Some(path) => {
                fs::write(path, content)?;
                info!("Wrote {} records to {}", table.len(), path.display());
            }
            None => println!("{}", content),
        }
        Ok(())
    }
}
