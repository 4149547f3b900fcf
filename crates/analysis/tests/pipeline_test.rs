use chatscope_analysis::parsers::lexer::DatePrefixLexer;
use chatscope_analysis::parsers::{ChatParser, ParseError, WhatsAppParser};
use chatscope_analysis::{
    parse_transcript, AnalysisConfig, AnalysisError, AnalysisReport, Aggregator, MessageTable,
};
use chatscope_core::{Sender, UserFilter};
use chrono::NaiveDate;
use std::fs;

const GROUP_EXPORT: &str = "\
Messages and calls are end-to-end encrypted.
28/07/20, 6:47\u{202f}pm - Priya created group \"Weekend\"
28/07/20, 6:48 pm - Priya: Who's in for Saturday?
28/07/20, 6:50 pm - Rahul: me! 🙌
bringing snacks
29/07/20, 9:02 am - Rahul: <Media omitted>
29/07/20, 9:05 am - Anya: link: https://maps.example.com/park
1/8/20, 11:59 pm - Priya: meet at 9: 30 am then 🙌🙌
";

fn parse(text: &str) -> MessageTable {
    parse_transcript(text).expect("transcript parses")
}

#[test]
fn timestamps_line_up_with_matched_prefixes() {
    let table = parse(GROUP_EXPORT);
    let prefixes: Vec<_> = DatePrefixLexer::new(GROUP_EXPORT).collect();

    assert_eq!(prefixes.len(), table.len());
    for (prefix, message) in prefixes.iter().zip(table.messages()) {
        assert_eq!(prefix.to_datetime(), message.timestamp);
    }
}

#[test]
fn group_export_parses_into_records() {
    let table = parse(GROUP_EXPORT);
    let messages = table.messages();

    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0].sender, Sender::GroupNotification);
    assert_eq!(messages[0].body, "Priya created group \"Weekend\"");
    assert_eq!(messages[2].body, "me! 🙌\nbringing snacks");
    assert_eq!(messages[4].body, "link: https://maps.example.com/park");
    assert_eq!(messages[5].body, "meet at 9: 30 am then 🙌🙌");

    let time = messages[5].time.as_ref().expect("time parts");
    assert_eq!(time.period, "23-00");
    assert_eq!(time.hour_12, "11:59 PM");
    assert_eq!(time.day_name, "Saturday");
}

#[test]
fn overall_report_matches_sender_totals() {
    let table = parse(GROUP_EXPORT);
    let config = AnalysisConfig::default();
    let aggregator = Aggregator::new(&table, &config);

    let report = AnalysisReport::build(&aggregator, &UserFilter::Overall).unwrap();
    assert_eq!(report.summary.messages, 6);
    assert_eq!(report.summary.media, 1);
    assert_eq!(report.summary.links, 1);

    let busiest = report.busiest_senders.expect("overall has busiest senders");
    let counted: u64 = busiest.shares.len() as u64;
    assert_eq!(counted, 4);
    let top_total: u64 = busiest.top.iter().map(|s| s.count).sum();
    assert_eq!(top_total, report.summary.messages);

    let share_total: f64 = busiest.shares.iter().map(|s| s.percent).sum();
    assert!((share_total - 100.0).abs() < 0.05);

    assert_eq!(report.emoji[0].emoji, "🙌");
    assert_eq!(report.emoji[0].count, 3);
    assert_eq!(report.monthly_timeline.len(), 2);
    assert_eq!(report.monthly_timeline[0].label, "July-2020");
    assert_eq!(report.monthly_timeline[1].label, "August-2020");
}

#[test]
fn filtered_report_drops_other_senders() {
    let table = parse(GROUP_EXPORT);
    let config = AnalysisConfig::default();
    let aggregator = Aggregator::new(&table, &config);

    let rahul = UserFilter::from("Rahul");
    let report = AnalysisReport::build(&aggregator, &rahul).unwrap();
    assert_eq!(report.summary.messages, 2);
    assert_eq!(report.summary.media, 1);
    assert!(report.busiest_senders.is_none());
    // Media placeholders stay out of the word stream.
    let words: Vec<&str> = report.common_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["me!", "🙌", "bringing", "snacks"]);
}

#[test]
fn out_of_order_export_keeps_input_order_but_timelines_are_calendar_ordered() {
    let table = parse(
        "3/2/23, 9:00 am - Alice: february first\n\
         15/1/23, 8:00 pm - Bob: january later\n\
         2/1/23, 7:00 am - Alice: january early\n",
    );
    let bodies: Vec<&str> = table.messages().iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["february first", "january later", "january early"]);

    let config = AnalysisConfig::default();
    let aggregator = Aggregator::new(&table, &config);
    let overall = UserFilter::Overall;

    let timeline = aggregator.monthly_timeline(&overall);
    let months: Vec<(&str, u64)> = timeline
        .iter()
        .map(|p| (p.label.as_str(), p.count))
        .collect();
    assert_eq!(months, vec![("January-2023", 2), ("February-2023", 1)]);

    let days: Vec<NaiveDate> = aggregator
        .daily_timeline(&overall)
        .into_iter()
        .map(|p| p.date)
        .collect();
    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 3).unwrap(),
        ]
    );
}

#[test]
fn not_a_transcript_is_a_distinct_failure() {
    let err = WhatsAppParser::new()
        .parse("Dear diary,\ntoday was fine.")
        .unwrap_err();
    assert!(matches!(err, ParseError::NoMatch));

    let wrapped: AnalysisError = err.into();
    assert!(wrapped.to_string().contains("Not a recognized transcript format"));
}

#[test]
fn exported_table_reloads_from_disk() {
    let table = parse(GROUP_EXPORT);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.json");

    let rows = table.to_json_rows().unwrap();
    fs::write(&path, serde_json::to_string_pretty(&rows).unwrap()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let reloaded = MessageTable::from_json_str(&content).unwrap();
    assert_eq!(reloaded, table);
}

#[test]
fn table_without_sender_column_cannot_be_aggregated() {
    let err = MessageTable::from_json_str(r#"[{"body": "hi", "timestamp": null}]"#).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingColumn(_)));
}
