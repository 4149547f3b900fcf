//! Aggregations over a message table.
//!
//! Every query filters by sender first and never mutates the table, so an
//! [`Aggregator`] can be shared freely between threads. Records without a
//! timestamp count toward totals but are left out of every time grouping.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::nlp::{self, EmojiCount, WordCount};
use crate::table::MessageTable;
use chatscope_core::constants::PERCENT_PRECISION;
use chatscope_core::{hour_bucket, Message, Sender, TimeParts, UserFilter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Headline counts for one filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Messages, including those without a timestamp.
    pub messages: u64,
    /// Whitespace-separated words across all bodies.
    pub words: u64,
    /// Bodies equal to the media placeholder.
    pub media: u64,
    /// Messages holding at least one link.
    pub links: u64,
}

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Year.
    pub year: i32,
    /// Month number (1-12).
    pub month_num: u32,
    /// "Month-Year" label, e.g. "July-2020".
    pub label: String,
    /// Messages in the month.
    pub count: u64,
}

/// Messages on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Date.
    pub date: NaiveDate,
    /// Messages on the date.
    pub count: u64,
}

/// Messages under one label of an activity map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    /// Weekday or month name.
    pub label: String,
    /// Messages with that label.
    pub count: u64,
}

/// Weekday by hour-bucket message counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    /// Weekday names present, Monday first.
    pub rows: Vec<String>,
    /// Hour buckets present, in clock order.
    pub columns: Vec<String>,
    /// `cells[row][column]`, zero where nothing was sent.
    pub cells: Vec<Vec<u64>>,
}

impl ActivityHeatmap {
    /// Count for a weekday name and hour bucket, if both are present.
    pub fn get(&self, day_name: &str, period: &str) -> Option<u64> {
        let row = self.rows.iter().position(|r| r == day_name)?;
        let column = self.columns.iter().position(|c| c == period)?;
        self.cells.get(row)?.get(column).copied()
    }

    /// Sum of every cell.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

/// Messages sent by one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    /// Sender name or the notification sentinel.
    pub sender: String,
    /// Messages sent.
    pub count: u64,
}

/// A sender's share of all messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderShare {
    /// Sender name or the notification sentinel.
    pub sender: String,
    /// Percentage of all messages, rounded to two decimals.
    pub percent: f64,
}

/// Busiest senders and every sender's share.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusiestSenders {
    /// Top senders by message count.
    pub top: Vec<SenderCount>,
    /// Share of every sender, same order as `top`.
    pub shares: Vec<SenderShare>,
}

/// Read-only query surface over one table.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    table: &'a MessageTable,
    config: &'a AnalysisConfig,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator over `table`.
    pub fn new(table: &'a MessageTable, config: &'a AnalysisConfig) -> Self {
        Self { table, config }
    }

    /// The underlying table.
    pub fn table(&self) -> &'a MessageTable {
        self.table
    }

    /// The options in effect.
    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    fn timed<'b>(&'b self, filter: &'b UserFilter) -> impl Iterator<Item = &'b TimeParts> + 'b {
        self.table
            .filtered(filter)
            .filter_map(|message| message.time.as_ref())
    }

    /// Message, word, media and link counts.
    pub fn summary(&self, filter: &UserFilter) -> SummaryStats {
        let placeholder = self.config.media_placeholder.as_str();
        self.table
            .filtered(filter)
            .fold(SummaryStats::default(), |mut stats, message| {
                stats.messages += 1;
                stats.words += nlp::word_count(&message.body) as u64;
                if message.body.trim() == placeholder {
                    stats.media += 1;
                }
                if nlp::contains_url(&message.body) {
                    stats.links += 1;
                }
                stats
            })
    }

    /// Messages per calendar month, oldest first.
    pub fn monthly_timeline(&self, filter: &UserFilter) -> Vec<MonthlyPoint> {
        let mut months: BTreeMap<(i32, u32), MonthlyPoint> = BTreeMap::new();
        for time in self.timed(filter) {
            months
                .entry((time.year, time.month_num))
                .or_insert_with(|| MonthlyPoint {
                    year: time.year,
                    month_num: time.month_num,
                    label: format!("{}-{}", time.month, time.year),
                    count: 0,
                })
                .count += 1;
        }
        months.into_values().collect()
    }

    /// Messages per calendar date, oldest first.
    pub fn daily_timeline(&self, filter: &UserFilter) -> Vec<DailyPoint> {
        let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for time in self.timed(filter) {
            *days.entry(time.date).or_insert(0) += 1;
        }
        days.into_iter()
            .map(|(date, count)| DailyPoint { date, count })
            .collect()
    }

    /// Messages per weekday, busiest first; ties in Monday-first order.
    pub fn week_activity_map(&self, filter: &UserFilter) -> Vec<ActivityCount> {
        ranked_activity(
            self.timed(filter)
                .map(|time| (time.weekday().num_days_from_monday(), time.day_name.as_str())),
        )
    }

    /// Messages per month name, busiest first; ties in January-first order.
    pub fn month_activity_map(&self, filter: &UserFilter) -> Vec<ActivityCount> {
        ranked_activity(
            self.timed(filter)
                .map(|time| (time.month_num, time.month.as_str())),
        )
    }

    /// Weekday by hour-bucket grid.
    pub fn activity_heatmap(&self, filter: &UserFilter) -> ActivityHeatmap {
        let mut counts: HashMap<(u32, u32), u64> = HashMap::new();
        let mut days: BTreeMap<u32, &str> = BTreeMap::new();
        let mut hours: BTreeSet<u32> = BTreeSet::new();

        for time in self.timed(filter) {
            let day = time.weekday().num_days_from_monday();
            days.entry(day).or_insert(time.day_name.as_str());
            hours.insert(time.hour);
            *counts.entry((day, time.hour)).or_insert(0) += 1;
        }

        let cells = days
            .keys()
            .map(|day| {
                hours
                    .iter()
                    .map(|hour| counts.get(&(*day, *hour)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        ActivityHeatmap {
            rows: days.values().map(|name| name.to_string()).collect(),
            columns: hours.iter().map(|hour| hour_bucket(*hour)).collect(),
            cells,
        }
    }

    /// Top senders by message count and every sender's percentage share.
    ///
    /// Only defined for [`UserFilter::Overall`]. Ties keep first-appearance
    /// order; the notification sentinel is counted like any sender.
    pub fn busiest_senders(&self, filter: &UserFilter) -> AnalysisResult<BusiestSenders> {
        if !filter.is_overall() {
            return Err(AnalysisError::UnsupportedFilter(format!(
                "busiest senders needs Overall, got '{}'",
                filter
            )));
        }

        let ranked = nlp::rank_by_frequency(
            self.table.messages().iter().map(|message| message.sender.as_str()),
            0,
        );
        let total = self.table.len() as f64;

        let shares = ranked
            .iter()
            .map(|(sender, count)| SenderShare {
                sender: sender.clone(),
                percent: round_percent(*count as f64 / total * 100.0),
            })
            .collect();
        let keep = match self.config.top_senders {
            0 => ranked.len(),
            n => n,
        };
        let top = ranked
            .into_iter()
            .take(keep)
            .map(|(sender, count)| SenderCount { sender, count })
            .collect();

        Ok(BusiestSenders { top, shares })
    }

    /// Messages per sender over the whole table, first-appearance order.
    pub fn sender_counts(&self) -> Vec<(Sender, u64)> {
        let mut index: HashMap<&Sender, usize> = HashMap::new();
        let mut counts: Vec<(Sender, u64)> = Vec::new();
        for message in self.table.messages() {
            match index.get(&message.sender) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(&message.sender, counts.len());
                    counts.push((message.sender.clone(), 1));
                }
            }
        }
        counts
    }

    /// Lowercased, stop-word-free tokens for a word cloud.
    pub fn lexical_tokens(&self, filter: &UserFilter) -> Vec<String> {
        nlp::lexical_tokens(
            self.table.filtered(filter),
            &self.config.stop_words,
            &self.config.media_placeholder,
        )
    }

    /// Most frequent tokens of the lexical stream.
    pub fn most_common_words(&self, filter: &UserFilter) -> Vec<WordCount> {
        nlp::most_common_words(&self.lexical_tokens(filter), self.config.top_words)
    }

    /// Emoji frequencies, most frequent first.
    pub fn emoji_counts(&self, filter: &UserFilter) -> Vec<EmojiCount> {
        nlp::emoji_counts(self.table.filtered(filter), self.config.top_emoji)
    }

    /// Messages in the filter, for callers that need raw records.
    pub fn messages<'b>(
        &'b self,
        filter: &'b UserFilter,
    ) -> impl Iterator<Item = &'b Message> + 'b {
        self.table.filtered(filter)
    }
}

fn ranked_activity<'t, I>(keys: I) -> Vec<ActivityCount>
where
    I: Iterator<Item = (u32, &'t str)>,
{
    let mut groups: BTreeMap<u32, (&str, u64)> = BTreeMap::new();
    for (order, label) in keys {
        groups.entry(order).or_insert((label, 0)).1 += 1;
    }

    let mut ranked: Vec<ActivityCount> = groups
        .into_values()
        .map(|(label, count)| ActivityCount {
            label: label.to_string(),
            count,
        })
        .collect();
    // Stable: equal counts stay in calendar order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn round_percent(value: f64) -> f64 {
    let scale = 10f64.powi(PERCENT_PRECISION);
    (value * scale).round() / scale
}

/// First day of the month for a monthly point.
pub fn month_start(point: &MonthlyPoint) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(point.year, point.month_num, 1)
}
