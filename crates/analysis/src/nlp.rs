use crate::error::AnalysisResult;
use chatscope_core::error::IntoCoreError;
use chatscope_core::Message;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("url regex"));

/// A flag (pair of regional indicators), or a pictograph with its optional
/// skin tone. Stray indicators and modifiers count on their own.
static EMOJI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\p{Regional_Indicator}{2}",
        r"|\p{Extended_Pictographic}\p{Emoji_Modifier}?",
        r"|\p{Emoji_Modifier}",
        r"|\p{Regional_Indicator}",
    ))
    .expect("emoji regex")
});

/// Words dropped from the lexical token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Create a stop-word set; entries are lowercased.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    /// Common English function words.
    pub fn english() -> Self {
        Self::new([
            "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "at", "is", "are", "was",
            "were", "be", "been", "being", "that", "this", "it", "as", "by", "with",
        ])
    }

    /// Read one word per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(&format!("reading stop words from {}", path.display()))?;
        Ok(Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Add more words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate over the stop words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Word occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// Lowercased token.
    pub word: String,
    /// Occurrences.
    pub count: u64,
}

/// Emoji occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    /// Single emoji codepoint.
    pub emoji: String,
    /// Occurrences.
    pub count: u64,
}

/// Whitespace-separated words of a message body.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Whether the body holds an `http://`, `https://` or `www.` link.
pub fn contains_url(body: &str) -> bool {
    URL_PATTERN.is_match(body)
}

/// Emoji of `body`, in order.
pub fn extract_emoji(body: &str) -> impl Iterator<Item = &str> {
    EMOJI_PATTERN.find_iter(body).map(|m| m.as_str())
}

/// Lowercased tokens of user-written text.
///
/// Notification records and media placeholders contribute nothing; stop
/// words are removed.
pub fn lexical_tokens<'a, I>(
    messages: I,
    stop_words: &StopWords,
    media_placeholder: &str,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .filter(|message| !message.sender.is_notification())
        .filter(|message| message.body.trim() != media_placeholder)
        .flat_map(|message| {
            message
                .body
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .filter(|token| !token.is_empty() && !stop_words.is_stop_word(token))
        .collect()
}

/// Count items, most frequent first; ties keep first-occurrence order.
///
/// `limit` of 0 keeps every item.
pub fn rank_by_frequency<I, S>(items: I, limit: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for item in items {
        let item = item.as_ref();
        match index.get(item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(item.to_string(), counts.len());
                counts.push((item.to_string(), 1));
            }
        }
    }

    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if limit > 0 {
        counts.truncate(limit);
    }
    counts
}

/// Most frequent tokens.
pub fn most_common_words(tokens: &[String], limit: usize) -> Vec<WordCount> {
    rank_by_frequency(tokens, limit)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Emoji frequencies across message bodies.
pub fn emoji_counts<'a, I>(messages: I, limit: usize) -> Vec<EmojiCount>
where
    I: IntoIterator<Item = &'a Message>,
{
    let emoji = messages
        .into_iter()
        .flat_map(|message| extract_emoji(&message.body));
    rank_by_frequency(emoji, limit)
        .into_iter()
        .map(|(emoji, count)| EmojiCount { emoji, count })
        .collect()
}
