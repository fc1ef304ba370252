//! Date fragment parser
//!
//! Turns one scraped festival string such as `元旦[1月1日]` into a
//! [`ParsedFestival`] with a real calendar date.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use crate::error::{EntryDefect, JieriError, Result};
use crate::types::ParsedFestival;

/// Month/day notation used by the source page, e.g. `10月1日`
fn month_day_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})月(\d{1,2})日").expect("valid month/day pattern"))
}

/// Parse a raw festival entry for the given year.
///
/// The entry is split at its first `[`: the left side is the festival
/// name, the right side must contain a `<m>月<d>日` date. A trailing `]`
/// is optional since the page scraper splits the list on it.
///
/// # Arguments
/// * `raw` - Raw entry text as scraped from the page
/// * `year` - Calendar year the date belongs to
///
/// # Returns
/// * `Ok(ParsedFestival)` with trimmed name and validated date
/// * `Err(JieriError::MalformedEntry)` if the shape or date is wrong
///
/// # Examples
/// ```
/// use jieri_core::parser::parse_festival;
///
/// let festival = parse_festival("元旦[1月1日]", 2024).unwrap();
/// assert_eq!(festival.name, "元旦");
/// assert_eq!(festival.date_stamp(), "20240101");
///
/// assert!(parse_festival("坏数据", 2024).is_err());
/// ```
pub fn parse_festival(raw: &str, year: i32) -> Result<ParsedFestival> {
    let (name_part, fragment) = raw
        .split_once('[')
        .ok_or_else(|| JieriError::malformed(raw, EntryDefect::MissingBracket))?;

    let name = clean_festival_name(name_part);
    if name.is_empty() {
        return Err(JieriError::malformed(raw, EntryDefect::EmptyName));
    }

    let (month, day) = extract_month_day(fragment)
        .ok_or_else(|| JieriError::malformed(raw, EntryDefect::MissingDate))?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        JieriError::malformed(raw, EntryDefect::InvalidDate { year, month, day })
    })?;

    Ok(ParsedFestival { name, date })
}

/// Find the first `<m>月<d>日` pattern in a date fragment.
///
/// Only the shape is checked here; range validation happens when the
/// pair is combined with a year.
///
/// # Examples
/// ```
/// use jieri_core::parser::extract_month_day;
///
/// assert_eq!(extract_month_day("10月1日]"), Some((10, 1)));
/// assert_eq!(extract_month_day("农历正月初一(2月10日)"), Some((2, 10)));
/// assert_eq!(extract_month_day("正月初一"), None);
/// ```
pub fn extract_month_day(fragment: &str) -> Option<(u32, u32)> {
    let caps = month_day_regex().captures(fragment)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some((month, day))
}

/// Strip bracket leftovers and collapse whitespace in a festival name.
///
/// Names end up on single ICS content lines, so embedded line breaks
/// are folded into one space.
pub fn clean_festival_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '[' || c == ']')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
