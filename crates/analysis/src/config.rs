use crate::error::AnalysisResult;
use crate::nlp::StopWords;
use chatscope_core::config::AnalysisSettings;
use chatscope_core::constants::{
    DEFAULT_TOP_EMOJI, DEFAULT_TOP_SENDERS, DEFAULT_TOP_WORDS, MEDIA_OMITTED,
};
use tracing::debug;

/// Resolved options for the aggregation routines.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Words dropped from the lexical token stream.
    pub stop_words: StopWords,

    /// Size of the most-common-words table; 0 keeps every word.
    pub top_words: usize,

    /// Size of the busiest-senders table; 0 keeps every sender.
    pub top_senders: usize,

    /// Size of the emoji table; 0 keeps every emoji.
    pub top_emoji: usize,

    /// Body text that marks an omitted media attachment.
    pub media_placeholder: String,
}

impl AnalysisConfig {
    /// Resolve file-level settings, reading the stop-word file if one is set.
    ///
    /// The built-in English list applies only when the settings name no stop
    /// words at all.
    pub fn from_settings(settings: &AnalysisSettings) -> AnalysisResult<Self> {
        let stop_words = if settings.stop_words.is_empty() && settings.stop_words_file.is_none() {
            StopWords::english()
        } else {
            let mut words = StopWords::new(&settings.stop_words);
            if let Some(path) = &settings.stop_words_file {
                let from_file = StopWords::from_file(path)?;
                debug!("Loaded {} stop words from {}", from_file.len(), path.display());
                words.extend(from_file.iter());
            }
            words
        };

        Ok(Self {
            stop_words,
            top_words: settings.top_words,
            top_senders: settings.top_senders,
            top_emoji: settings.top_emoji,
            media_placeholder: settings.media_placeholder.clone(),
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::english(),
            top_words: DEFAULT_TOP_WORDS,
            top_senders: DEFAULT_TOP_SENDERS,
            top_emoji: DEFAULT_TOP_EMOJI,
            media_placeholder: MEDIA_OMITTED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_settings_use_english_stop_words() {
        let config = AnalysisConfig::from_settings(&AnalysisSettings::default()).unwrap();
        assert!(config.stop_words.is_stop_word("the"));
        assert_eq!(config.top_words, DEFAULT_TOP_WORDS);
    }

    #[test]
    fn inline_and_file_stop_words_are_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hai\nka").unwrap();

        let settings = AnalysisSettings {
            stop_words: vec!["The".to_string()],
            stop_words_file: Some(file.path().to_path_buf()),
            ..AnalysisSettings::default()
        };
        let config = AnalysisConfig::from_settings(&settings).unwrap();

        assert_eq!(config.stop_words.len(), 3);
        assert!(config.stop_words.is_stop_word("the"));
        assert!(!config.stop_words.is_stop_word("and"));
    }

    #[test]
    fn missing_stop_word_file_is_an_error() {
        let settings = AnalysisSettings {
            stop_words_file: Some("/nonexistent/chatscope/stop.txt".into()),
            ..AnalysisSettings::default()
        };
        assert!(AnalysisConfig::from_settings(&settings).is_err());
    }
}
