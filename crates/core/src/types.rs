use crate::constants::{GROUP_NOTIFICATION, OVERALL};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a transcript entry.
///
/// Serialized as a plain string; system-generated entries use the
/// `group_notification` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// A named chat participant.
    User(String),

    /// Join/leave/title-change entries with no attributable author.
    GroupNotification,
}

impl Sender {
    /// Returns the sender as it appears in the transcript.
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User(name) => name,
            Sender::GroupNotification => GROUP_NOTIFICATION,
        }
    }

    /// Whether this is the system sentinel.
    pub fn is_notification(&self) -> bool {
        matches!(self, Sender::GroupNotification)
    }
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == GROUP_NOTIFICATION {
            Sender::GroupNotification
        } else {
            Sender::User(value)
        }
    }
}

impl From<&str> for Sender {
    fn from(value: &str) -> Self {
        Sender::from(value.to_string())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::User(name) => name,
            Sender::GroupNotification => GROUP_NOTIFICATION.to_string(),
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts an aggregation to one sender, or to none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserFilter {
    /// All senders combined.
    Overall,

    /// Only records whose sender matches exactly.
    Sender(String),
}

impl UserFilter {
    /// Whether a record from `sender` passes this filter.
    pub fn matches(&self, sender: &Sender) -> bool {
        match self {
            UserFilter::Overall => true,
            UserFilter::Sender(name) => sender.as_str() == name,
        }
    }

    /// Whether this is the no-filter mode.
    pub fn is_overall(&self) -> bool {
        matches!(self, UserFilter::Overall)
    }
}

impl Default for UserFilter {
    fn default() -> Self {
        UserFilter::Overall
    }
}

impl From<String> for UserFilter {
    fn from(value: String) -> Self {
        if value == OVERALL {
            UserFilter::Overall
        } else {
            UserFilter::Sender(value)
        }
    }
}

impl From<&str> for UserFilter {
    fn from(value: &str) -> Self {
        UserFilter::from(value.to_string())
    }
}

impl From<UserFilter> for String {
    fn from(value: UserFilter) -> Self {
        match value {
            UserFilter::Overall => OVERALL.to_string(),
            UserFilter::Sender(name) => name,
        }
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserFilter::Overall => f.write_str(OVERALL),
            UserFilter::Sender(name) => f.write_str(name),
        }
    }
}

/// Calendar fields derived once from a message timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    /// Calendar date only.
    pub date: NaiveDate,

    /// Year.
    pub year: i32,

    /// Month number (1-12).
    pub month_num: u32,

    /// Month name, e.g. "July".
    pub month: String,

    /// Day of month.
    pub day: u32,

    /// Weekday name, e.g. "Tuesday".
    pub day_name: String,

    /// Hour of day on a 24-hour clock.
    pub hour: u32,

    /// 12-hour clock string, e.g. "06:47 PM".
    pub hour_12: String,

    /// One-hour window label used for heatmap columns, e.g. "18-19".
    pub period: String,
}

impl TimeParts {
    /// Derive every calendar field from `timestamp`.
    pub fn from_datetime(timestamp: &NaiveDateTime) -> Self {
        let hour = timestamp.hour();
        Self {
            date: timestamp.date(),
            year: timestamp.year(),
            month_num: timestamp.month(),
            month: timestamp.format("%B").to_string(),
            day: timestamp.day(),
            day_name: timestamp.format("%A").to_string(),
            hour,
            hour_12: timestamp.format("%I:%M %p").to_string(),
            period: hour_bucket(hour),
        }
    }

    /// Weekday of the date, for calendar ordering.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Label for the one-hour window starting at `hour`.
///
/// Midnight and the last hour are written as "00-1" and "23-00".
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-1".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}

/// One parsed chat entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Parsed date-time prefix; `None` when the prefix could not be read.
    pub timestamp: Option<NaiveDateTime>,

    /// Author, or the notification sentinel.
    pub sender: Sender,

    /// Free text after the sender prefix; may be empty.
    pub body: String,

    /// Derived calendar fields, present iff `timestamp` is.
    pub time: Option<TimeParts>,
}

impl Message {
    /// Build a record and derive its calendar fields.
    pub fn new(timestamp: Option<NaiveDateTime>, sender: Sender, body: impl Into<String>) -> Self {
        let time = timestamp.as_ref().map(TimeParts::from_datetime);
        Self {
            timestamp,
            sender,
            body: body.into(),
            time,
        }
    }
}
