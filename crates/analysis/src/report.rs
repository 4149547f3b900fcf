use crate::error::AnalysisResult;
use crate::nlp::{EmojiCount, WordCount};
use crate::stats::{
    ActivityCount, ActivityHeatmap, Aggregator, BusiestSenders, DailyPoint, MonthlyPoint,
    SummaryStats,
};
use chatscope_core::UserFilter;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Every aggregation for one user filter, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Filter the report was computed for.
    pub filter: UserFilter,
    /// Headline counts.
    pub summary: SummaryStats,
    /// Messages per month.
    pub monthly_timeline: Vec<MonthlyPoint>,
    /// Messages per date.
    pub daily_timeline: Vec<DailyPoint>,
    /// Messages per weekday.
    pub busiest_days: Vec<ActivityCount>,
    /// Messages per month name.
    pub busiest_months: Vec<ActivityCount>,
    /// Weekday by hour-bucket grid.
    pub heatmap: ActivityHeatmap,
    /// Only present for the Overall filter.
    pub busiest_senders: Option<BusiestSenders>,
    /// Most frequent words.
    pub common_words: Vec<WordCount>,
    /// Emoji frequencies.
    pub emoji: Vec<EmojiCount>,
}

impl AnalysisReport {
    /// Run every aggregation for `filter`.
    #[instrument(skip(aggregator))]
    pub fn build(aggregator: &Aggregator<'_>, filter: &UserFilter) -> AnalysisResult<Self> {
        let busiest_senders = if filter.is_overall() {
            Some(aggregator.busiest_senders(filter)?)
        } else {
            None
        };

        Ok(Self {
            filter: filter.clone(),
            summary: aggregator.summary(filter),
            monthly_timeline: aggregator.monthly_timeline(filter),
            daily_timeline: aggregator.daily_timeline(filter),
            busiest_days: aggregator.week_activity_map(filter),
            busiest_months: aggregator.month_activity_map(filter),
            heatmap: aggregator.activity_heatmap(filter),
            busiest_senders,
            common_words: aggregator.most_common_words(filter),
            emoji: aggregator.emoji_counts(filter),
        })
    }
}
