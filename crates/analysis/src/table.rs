use crate::error::{AnalysisError, AnalysisResult};
use chatscope_core::constants::OVERALL;
use chatscope_core::{Message, Sender, UserFilter};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::collections::HashSet;

const SENDER_COLUMN: &str = "sender";
const BODY_COLUMN: &str = "body";
const TIMESTAMP_COLUMN: &str = "timestamp";

/// Immutable sequence of parsed records in transcript order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: Vec<Message>,
}

impl MessageTable {
    /// Wrap already-built records.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// All records.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Records passing `filter`, in transcript order.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a UserFilter,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages
            .iter()
            .filter(move |message| filter.matches(&message.sender))
    }

    /// Distinct senders in order of first appearance, sentinel included.
    pub fn senders(&self) -> Vec<&Sender> {
        let mut seen = HashSet::new();
        self.messages
            .iter()
            .map(|message| &message.sender)
            .filter(|sender| seen.insert(*sender))
            .collect()
    }

    /// Choices for a sender selector: `Overall` followed by every named
    /// sender in sorted order.
    pub fn sender_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .senders()
            .into_iter()
            .filter(|sender| !sender.is_notification())
            .map(|sender| sender.as_str().to_string())
            .collect();
        names.sort();
        names.insert(0, OVERALL.to_string());
        names
    }

    /// Export the table as a list of row objects.
    pub fn to_json_rows(&self) -> AnalysisResult<Value> {
        Ok(serde_json::to_value(&self.messages)?)
    }

    /// Load a table from JSON text holding a list of row objects.
    pub fn from_json_str(content: &str) -> AnalysisResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_rows(&value)
    }

    /// Load a table from a list of row objects.
    ///
    /// `sender` and `body` are required on every row, `timestamp` may be
    /// absent or null. Calendar fields are always recomputed.
    pub fn from_json_rows(value: &Value) -> AnalysisResult<Self> {
        let rows = value
            .as_array()
            .ok_or_else(|| AnalysisError::InvalidTable("expected a list of rows".to_string()))?;

        let messages = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let row = row.as_object().ok_or_else(|| {
                    AnalysisError::InvalidTable(format!("row {} is not an object", index))
                })?;
                row_to_message(index, row)
            })
            .collect::<AnalysisResult<Vec<_>>>()?;

        Ok(Self { messages })
    }
}

fn row_to_message(index: usize, row: &Map<String, Value>) -> AnalysisResult<Message> {
    let sender = match row.get(SENDER_COLUMN) {
        None => return Err(AnalysisError::MissingColumn(SENDER_COLUMN.to_string())),
        Some(Value::String(name)) if !name.is_empty() => Sender::from(name.as_str()),
        Some(other) => {
            return Err(invalid(
                index,
                SENDER_COLUMN,
                "expected a non-empty string",
                other,
            ))
        }
    };

    let body = match row.get(BODY_COLUMN) {
        None => return Err(AnalysisError::MissingColumn(BODY_COLUMN.to_string())),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) => String::new(),
        Some(other) => return Err(invalid(index, BODY_COLUMN, "expected a string", other)),
    };

    let timestamp = match row.get(TIMESTAMP_COLUMN) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.parse::<NaiveDateTime>().map_err(|e| {
            AnalysisError::InvalidColumn {
                row: index,
                column: TIMESTAMP_COLUMN.to_string(),
                reason: e.to_string(),
            }
        })?),
        Some(other) => {
            return Err(invalid(
                index,
                TIMESTAMP_COLUMN,
                "expected an ISO-8601 string or null",
                other,
            ))
        }
    };

    Ok(Message::new(timestamp, sender, body))
}

fn invalid(row: usize, column: &str, expected: &str, found: &Value) -> AnalysisError {
    AnalysisError::InvalidColumn {
        row,
        column: column.to_string(),
        reason: format!("{}, found {}", expected, found),
    }
}
