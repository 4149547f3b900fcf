use chatscope_analysis::stats::ActivityHeatmap;
use chatscope_analysis::AnalysisReport;
use std::fmt::Write;

/// Format a report as plain text sections.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(out, "Analysis for {}", report.filter)?;
    writeln!(out)?;

    heading(out, "TOP STATISTICS")?;
    let summary = &report.summary;
    writeln!(out, "  Total messages: {}", summary.messages)?;
    writeln!(out, "  Total words:    {}", summary.words)?;
    writeln!(out, "  Media shared:   {}", summary.media)?;
    writeln!(out, "  Links shared:   {}", summary.links)?;

    heading(out, "MONTHLY TIMELINE")?;
    rows(
        out,
        report
            .monthly_timeline
            .iter()
            .map(|p| (p.label.clone(), p.count)),
    )?;

    heading(out, "DAILY TIMELINE")?;
    rows(
        out,
        report
            .daily_timeline
            .iter()
            .map(|p| (p.date.to_string(), p.count)),
    )?;

    heading(out, "MOST BUSY DAY")?;
    rows(
        out,
        report.busiest_days.iter().map(|a| (a.label.clone(), a.count)),
    )?;

    heading(out, "MOST BUSY MONTH")?;
    rows(
        out,
        report
            .busiest_months
            .iter()
            .map(|a| (a.label.clone(), a.count)),
    )?;

    heading(out, "WEEKLY ACTIVITY MAP")?;
    heatmap(out, &report.heatmap)?;

    if let Some(busiest) = &report.busiest_senders {
        heading(out, "MOST BUSY USERS")?;
        rows(out, busiest.top.iter().map(|s| (s.sender.clone(), s.count)))?;
        writeln!(out)?;
        for share in &busiest.shares {
            writeln!(out, "  {:<24} {:>6.2}%", share.sender, share.percent)?;
        }
    }

    heading(out, "MOST COMMON WORDS")?;
    rows(
        out,
        report.common_words.iter().map(|w| (w.word.clone(), w.count)),
    )?;

    heading(out, "EMOJI ANALYSIS")?;
    rows(out, report.emoji.iter().map(|e| (e.emoji.clone(), e.count)))?;
    Ok(())
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

fn rows<I>(out: &mut String, items: I) -> std::fmt::Result
where
    I: Iterator<Item = (String, u64)>,
{
    let mut empty = true;
    for (label, count) in items {
        empty = false;
        writeln!(out, "  {:<24} {:>6}", label, count)?;
    }
    if empty {
        writeln!(out, "  (no data)")?;
    }
    Ok(())
}

fn heatmap(out: &mut String, grid: &ActivityHeatmap) -> std::fmt::Result {
    if grid.rows.is_empty() {
        return writeln!(out, "  (no data)");
    }
    write!(out, "  {:<10}", "")?;
    for column in &grid.columns {
        write!(out, " {:>6}", column)?;
    }
    writeln!(out)?;
    for (row, cells) in grid.rows.iter().zip(&grid.cells) {
        write!(out, "  {:<10}", row)?;
        for cell in cells {
            write!(out, " {:>6}", cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatscope_analysis::{parse_transcript, AnalysisConfig, Aggregator};
    use chatscope_core::UserFilter;

    #[test]
    fn overall_report_lists_every_section() {
        let table = parse_transcript(
            "1/1/23, 10:00 am - Alice: hello 😀\n1/1/23, 10:05 am - Bob: hi",
        )
        .unwrap();
        let config = AnalysisConfig::default();
        let aggregator = Aggregator::new(&table, &config);
        let report = AnalysisReport::build(&aggregator, &UserFilter::Overall).unwrap();

        let text = render_report(&report);
        for section in [
            "TOP STATISTICS",
            "MONTHLY TIMELINE",
            "DAILY TIMELINE",
            "MOST BUSY DAY",
            "MOST BUSY MONTH",
            "WEEKLY ACTIVITY MAP",
            "MOST BUSY USERS",
            "MOST COMMON WORDS",
            "EMOJI ANALYSIS",
        ] {
            assert!(text.contains(section), "missing section {}", section);
        }
        assert!(text.contains("January-2023"));
        assert!(text.contains("50.00%"));
    }

    #[test]
    fn single_sender_report_omits_busiest_users() {
        let table = parse_transcript("1/1/23, 10:00 am - Alice: hello").unwrap();
        let config = AnalysisConfig::default();
        let aggregator = Aggregator::new(&table, &config);
        let report = AnalysisReport::build(&aggregator, &UserFilter::from("Nobody")).unwrap();

        let text = render_report(&report);
        assert!(!text.contains("MOST BUSY USERS"));
        assert!(text.contains("(no data)"));
    }
}
