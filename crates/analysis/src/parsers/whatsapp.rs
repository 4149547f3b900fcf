use super::lexer::{DatePrefix, DatePrefixLexer};
use super::{ChatParser, ParseError, ParseSummary, ParsedTranscript};
use crate::table::MessageTable;
use chatscope_core::{Message, Sender};
use tracing::{debug, info};

/// Parser for day-first WhatsApp-style exports.
///
/// Every message starts with a `d/m/yy, h:mm am - ` prefix; the text up to
/// the next prefix belongs to that message, including any continuation lines.
pub struct WhatsAppParser {
    name_str: String,
}

impl WhatsAppParser {
    /// Creates a new WhatsAppParser instance.
    pub fn new() -> Self {
        Self {
            name_str: "whatsapp".to_string(),
        }
    }
}

impl Default for WhatsAppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatParser for WhatsAppParser {
    fn name(&self) -> &str {
        &self.name_str
    }

    fn can_parse(&self, text: &str) -> bool {
        DatePrefixLexer::new(text).next().is_some()
    }

    fn parse(&self, text: &str) -> Result<ParsedTranscript, ParseError> {
        let entries = segment(text)?;
        let mut summary = ParseSummary::default();
        let mut messages = Vec::with_capacity(entries.len());

        for entry in entries {
            let timestamp = entry.prefix.to_datetime();
            if timestamp.is_none() {
                debug!("Unreadable date-time prefix {:?}", entry.prefix.text);
                summary.null_timestamps += 1;
            }

            let (sender, body) = split_sender(entry.content);
            if sender.is_notification() {
                summary.notifications += 1;
            }
            messages.push(Message::new(timestamp, sender, body));
        }
        summary.messages = messages.len();

        info!(
            "Parsed {} messages ({} without timestamp, {} notifications)",
            summary.messages, summary.null_timestamps, summary.notifications
        );

        Ok(ParsedTranscript {
            table: MessageTable::new(messages),
            summary,
        })
    }
}

/// A date-time prefix and the raw text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// The prefix opening this entry.
    pub prefix: DatePrefix<'a>,
    /// Text up to the next prefix, minus the line break before it.
    pub content: &'a str,
}

/// Split a transcript into prefix-delimited entries.
///
/// Text before the first prefix is dropped. Fails with
/// [`ParseError::NoMatch`] when the text holds no prefix at all.
pub fn segment(text: &str) -> Result<Vec<RawEntry<'_>>, ParseError> {
    let prefixes: Vec<DatePrefix<'_>> = DatePrefixLexer::new(text).collect();
    if prefixes.is_empty() {
        return Err(ParseError::NoMatch);
    }

    let bounds: Vec<usize> = prefixes
        .iter()
        .skip(1)
        .map(|p| p.start)
        .chain(std::iter::once(text.len()))
        .collect();

    Ok(prefixes
        .into_iter()
        .zip(bounds)
        .map(|(prefix, end)| {
            let content = trim_line_break(&text[prefix.end..end]);
            RawEntry { prefix, content }
        })
        .collect())
}

fn trim_line_break(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}

/// Separate the author from the message text.
///
/// The author is everything before the first `": "` on the entry's first
/// line. Entries without one are system notifications and keep their whole
/// text as the body.
pub fn split_sender(content: &str) -> (Sender, &str) {
    let first_line = content.split('\n').next().unwrap_or(content);
    match first_line.find(": ") {
        Some(pos) if pos > 0 => (Sender::from(&content[..pos]), &content[pos + 2..]),
        _ => (Sender::GroupNotification, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_messages() {
        let parsed = WhatsAppParser::new()
            .parse("1/1/23, 10:00 am - Alice: hello\n1/1/23, 10:05 am - Bob: hi")
            .unwrap();
        let messages = parsed.table.messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::from("Alice"));
        assert_eq!(messages[0].body, "hello");
        assert_eq!(messages[1].sender, Sender::from("Bob"));
        assert_eq!(messages[1].body, "hi");
        assert_eq!(parsed.summary.notifications, 0);
    }

    #[test]
    fn body_colon_space_is_not_a_second_sender() {
        let (sender, body) = split_sender("Alice: see you at 9: 00 pm");
        assert_eq!(sender, Sender::from("Alice"));
        assert_eq!(body, "see you at 9: 00 pm");
    }

    #[test]
    fn system_line_becomes_notification() {
        let parsed = WhatsAppParser::new()
            .parse("1/1/23, 10:10 am - Alice added Bob\n")
            .unwrap();
        let message = &parsed.table.messages()[0];

        assert_eq!(message.sender, Sender::GroupNotification);
        assert_eq!(message.body, "Alice added Bob");
        assert_eq!(parsed.summary.notifications, 1);
    }

    #[test]
    fn sender_must_be_on_first_line() {
        let (sender, body) = split_sender("Alice changed the subject\nagenda: lunch");
        assert_eq!(sender, Sender::GroupNotification);
        assert_eq!(body, "Alice changed the subject\nagenda: lunch");
    }

    #[test]
    fn leading_colon_space_is_not_a_sender() {
        let (sender, _) = split_sender(": hello");
        assert_eq!(sender, Sender::GroupNotification);
    }

    #[test]
    fn multi_line_body_stays_in_one_record() {
        let text = "1/1/23, 10:00 am - Alice: first line\nsecond line\r\n\
                    1/1/23, 10:01 am - Bob: ok";
        let entries = segment(text).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Alice: first line\nsecond line");
        assert_eq!(entries[1].content, "Bob: ok");
    }

    #[test]
    fn unicode_sender_names_survive() {
        let (sender, body) = split_sender("Zoë 🌸 (work): ça va?");
        assert_eq!(sender.as_str(), "Zoë 🌸 (work)");
        assert_eq!(body, "ça va?");
    }

    #[test]
    fn unreadable_prefix_keeps_record_with_null_timestamp() {
        let parsed = WhatsAppParser::new()
            .parse("31/02/23, 10:00 am - Alice: ghost day\n1/3/23, 9:00 am - Bob: real")
            .unwrap();
        let messages = parsed.table.messages();

        assert_eq!(messages.len(), 2);
        assert!(messages[0].timestamp.is_none());
        assert!(messages[0].time.is_none());
        assert_eq!(messages[0].body, "ghost day");
        assert!(messages[1].timestamp.is_some());
        assert_eq!(parsed.summary.null_timestamps, 1);
    }

    #[test]
    fn empty_body_is_allowed() {
        let parsed = WhatsAppParser::new()
            .parse("1/1/23, 10:00 am - Alice: ")
            .unwrap();
        assert_eq!(parsed.table.messages()[0].body, "");
    }

    #[test]
    fn no_prefix_is_a_failure() {
        assert!(matches!(segment(""), Err(ParseError::NoMatch)));
        assert!(!WhatsAppParser::new().can_parse("Alice: hello"));
    }
}
