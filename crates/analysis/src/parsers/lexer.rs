//! Date-time prefix scanner.
//!
//! Finds every `d/m/yy, h:mm am - ` prefix in a transcript and exposes its
//! position and digit groups. Converting the groups into a timestamp is a
//! separate step so that one unreadable prefix never affects the scan.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{CaptureMatches, Captures};

/// Message boundary: day/month/year, hour:minute, optional meridiem, " - ".
///
/// Exports put a plain, no-break or narrow no-break space before the
/// meridiem; it never sits on the next line.
static DATE_PREFIX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(concat!(
        r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4}), ",
        r"([0-9]{1,2}):([0-9]{2})",
        r"(?:[ \x{a0}\x{202f}]?([ap]m))? - ",
    ))
    .expect("date prefix regex")
});

/// Morning or afternoon half of a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

/// One matched date-time prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePrefix<'a> {
    /// Byte offset of the first prefix character.
    pub start: usize,
    /// Byte offset just past the trailing " - ".
    pub end: usize,
    /// The literal matched text.
    pub text: &'a str,
    day: &'a str,
    month: &'a str,
    year: &'a str,
    hour: &'a str,
    minute: &'a str,
    /// Meridiem marker, absent on 24-hour exports.
    pub meridiem: Option<Meridiem>,
}

impl<'a> DatePrefix<'a> {
    fn from_captures(caps: Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        let meridiem = caps.get(6).map(|m| match m.as_str() {
            "am" => Meridiem::Am,
            _ => Meridiem::Pm,
        });
        Some(Self {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str(),
            day: caps.get(1)?.as_str(),
            month: caps.get(2)?.as_str(),
            year: caps.get(3)?.as_str(),
            hour: caps.get(4)?.as_str(),
            minute: caps.get(5)?.as_str(),
            meridiem,
        })
    }

    /// Interpret the prefix as a calendar timestamp.
    ///
    /// Two-digit years pivot at 69 (00-68 are 20xx). Without a meridiem the
    /// hour is read on a 24-hour clock. Returns `None` for impossible dates
    /// or times instead of guessing.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let day: u32 = self.day.parse().ok()?;
        let month: u32 = self.month.parse().ok()?;
        let year = match self.year.len() {
            2 => {
                let yy: i32 = self.year.parse().ok()?;
                if yy < 69 {
                    2000 + yy
                } else {
                    1900 + yy
                }
            }
            4 => self.year.parse().ok()?,
            _ => return None,
        };
        let hour: u32 = self.hour.parse().ok()?;
        let minute: u32 = self.minute.parse().ok()?;

        let hour = match self.meridiem {
            Some(meridiem) => {
                if !(1..=12).contains(&hour) {
                    return None;
                }
                match (meridiem, hour) {
                    (Meridiem::Am, 12) => 0,
                    (Meridiem::Am, h) => h,
                    (Meridiem::Pm, 12) => 12,
                    (Meridiem::Pm, h) => h + 12,
                }
            }
            None => hour,
        };

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
    }
}

/// Iterator over the date-time prefixes of a transcript, in text order.
pub struct DatePrefixLexer<'a> {
    matches: CaptureMatches<'static, 'a>,
}

impl<'a> DatePrefixLexer<'a> {
    /// Start scanning `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            matches: DATE_PREFIX.captures_iter(text),
        }
    }
}

impl<'a> Iterator for DatePrefixLexer<'a> {
    type Item = DatePrefix<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Every group except the meridiem is mandatory in the pattern.
        self.matches.next().and_then(DatePrefix::from_captures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> DatePrefix<'_> {
        let mut lexer = DatePrefixLexer::new(text);
        let prefix = lexer.next().expect("prefix");
        assert!(lexer.next().is_none());
        prefix
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn finds_prefix_positions_in_order() {
        let text = "junk\n1/1/23, 10:00 am - Alice: hello\n1/1/23, 10:05 am - Bob: hi";
        let prefixes: Vec<_> = DatePrefixLexer::new(text).collect();

        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0].start, 5);
        assert_eq!(prefixes[0].text, "1/1/23, 10:00 am - ");
        assert_eq!(prefixes[1].text, "1/1/23, 10:05 am - ");
        assert!(prefixes[0].end <= prefixes[1].start);
    }

    #[test]
    fn reads_day_first_twelve_hour_clock() {
        let prefix = single("28/07/20, 6:47 pm - ");
        assert_eq!(prefix.meridiem, Some(Meridiem::Pm));
        assert_eq!(prefix.to_datetime(), Some(ts(2020, 7, 28, 18, 47)));
    }

    #[test]
    fn accepts_narrow_no_break_space_before_meridiem() {
        let prefix = single("28/07/20, 6:47\u{202f}pm - ");
        assert_eq!(prefix.to_datetime(), Some(ts(2020, 7, 28, 18, 47)));
    }

    #[test]
    fn midnight_and_noon_follow_twelve_hour_rules() {
        assert_eq!(
            single("1/1/23, 12:05 am - ").to_datetime(),
            Some(ts(2023, 1, 1, 0, 5))
        );
        assert_eq!(
            single("1/1/23, 12:05 pm - ").to_datetime(),
            Some(ts(2023, 1, 1, 12, 5))
        );
    }

    #[test]
    fn two_digit_years_pivot_at_sixty_nine() {
        let date = |text: &str| single(text).to_datetime().unwrap().date().to_string();
        assert_eq!(date("1/1/68, 1:00 am - "), "2068-01-01");
        assert_eq!(date("1/1/69, 1:00 am - "), "1969-01-01");
    }

    #[test]
    fn fallbacks_cover_long_years_and_24_hour_clock() {
        assert_eq!(
            single("5/3/2021, 21:15 - ").to_datetime(),
            Some(ts(2021, 3, 5, 21, 15))
        );
    }

    #[test]
    fn impossible_values_yield_none() {
        assert_eq!(single("31/02/23, 10:00 am - ").to_datetime(), None);
        assert_eq!(single("1/13/23, 10:00 am - ").to_datetime(), None);
        assert_eq!(single("1/1/23, 13:00 pm - ").to_datetime(), None);
        assert_eq!(single("1/1/23, 10:75 am - ").to_datetime(), None);
        assert_eq!(single("1/1/202, 10:00 am - ").to_datetime(), None);
    }

    #[test]
    fn meridiem_on_next_line_is_not_a_prefix() {
        assert_eq!(DatePrefixLexer::new("1/1/23, 10:00\nam - x").count(), 0);
        assert_eq!(DatePrefixLexer::new("1/1/23, 10:00\tam - x").count(), 0);
        assert_eq!(
            single("1/1/23, 10:00\u{a0}am - ").to_datetime(),
            Some(ts(2023, 1, 1, 10, 0))
        );
    }

    #[test]
    fn text_without_prefix_yields_nothing() {
        assert_eq!(DatePrefixLexer::new("hello world\n10:00 - x").count(), 0);
    }
}
