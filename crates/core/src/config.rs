use crate::constants::{
    DEFAULT_TOP_EMOJI, DEFAULT_TOP_SENDERS, DEFAULT_TOP_WORDS, MAX_IMPORT_FILE_SIZE, MEDIA_OMITTED,
};
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for Chatscope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatscopeConfig {
    /// Lexical analysis and table sizes.
    pub analysis: AnalysisSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings consumed by the word, emoji and sender analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Stop words dropped from the lexical token stream.
    pub stop_words: Vec<String>,

    /// Optional file with one stop word per line, merged with `stop_words`.
    pub stop_words_file: Option<PathBuf>,

    /// Size of the most-common-words table; 0 keeps every word.
    pub top_words: usize,

    /// Size of the busiest-senders table; 0 keeps every sender.
    pub top_senders: usize,

    /// Size of the emoji table; 0 keeps every emoji.
    pub top_emoji: usize,

    /// Body text that marks an omitted media attachment.
    pub media_placeholder: String,

    /// Largest transcript file accepted, in bytes.
    pub max_import_bytes: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,

    /// Log format.
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format.
    Json,

    /// Text format.
    Text,
}

impl ChatscopeConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?;
        Ok(config_dir.join("chatscope").join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::FileSystem(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load(&path),
            Ok(_) => Ok(Self::default()),
            Err(err) => {
                tracing::warn!("{}; using default configuration", err);
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Parse(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| Error::FileSystem(format!("Failed to write config file: {}", e)))
    }

    /// Reject settings no analysis can run with.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.media_placeholder.trim().is_empty() {
            return Err(Error::validation("analysis.media_placeholder must not be empty"));
        }
        if self.analysis.max_import_bytes == 0 {
            return Err(Error::validation("analysis.max_import_bytes must be positive"));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            stop_words: Vec::new(),
            stop_words_file: None,
            top_words: DEFAULT_TOP_WORDS,
            top_senders: DEFAULT_TOP_SENDERS,
            top_emoji: DEFAULT_TOP_EMOJI,
            media_placeholder: MEDIA_OMITTED.to_string(),
            max_import_bytes: MAX_IMPORT_FILE_SIZE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Text,
        }
    }
}
