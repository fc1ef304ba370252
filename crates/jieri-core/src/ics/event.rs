//! `VEVENT` serialization
//!
//! Every festival becomes an all-day, transparent, confirmed event. Only
//! the dates, names, UID and `LAST-MODIFIED` vary between events.

use chrono::NaiveDateTime;

use crate::types::NumberedFestival;

/// Format of the `LAST-MODIFIED` value (floating local time)
pub const LAST_MODIFIED_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Fixed time of day used for `DTSTAMP` and `CREATED`
const STAMP_TIME: &str = "T000001";

/// Suffix marking UIDs produced by this generator
const UID_SUFFIX: &str = "_jr";

/// Build the UID of a festival event.
///
/// The UID combines the date with the festival's per-day sequence number,
/// so it is unique as long as sequence numbers are unique within a day.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use jieri_core::ics::event_uid;
/// use jieri_core::{NumberedFestival, ParsedFestival};
///
/// let festival = NumberedFestival {
///     festival: ParsedFestival::new("小年", NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()),
///     sequence: 2,
/// };
/// assert_eq!(event_uid(&festival), "20240210T000002_jr");
/// ```
pub fn event_uid(festival: &NumberedFestival) -> String {
    format!("{}T{:06}{}", festival.date_stamp(), festival.sequence, UID_SUFFIX)
}

/// Escape a TEXT property value (backslash, semicolon, comma, newline).
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn push_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push(':');
    out.push_str(value);
    out.push('\n');
}

/// Render one festival as a `VEVENT` block, newline-terminated.
///
/// # Arguments
/// * `festival` - Numbered festival to render
/// * `last_modified` - Generation timestamp shared by all events of a run
pub fn serialize_event(festival: &NumberedFestival, last_modified: NaiveDateTime) -> String {
    let date = festival.date_stamp();
    let stamp = format!("{}{}", date, STAMP_TIME);
    let name = escape_text(festival.name());

    let mut out = String::with_capacity(320);
    out.push_str("BEGIN:VEVENT\n");
    push_line(&mut out, "DTSTART;VALUE=DATE", &date);
    push_line(&mut out, "DTEND;VALUE=DATE", &date);
    push_line(&mut out, "DTSTAMP", &stamp);
    push_line(&mut out, "UID", &event_uid(festival));
    push_line(&mut out, "CREATED", &stamp);
    push_line(&mut out, "DESCRIPTION", &name);
    push_line(
        &mut out,
        "LAST-MODIFIED",
        &last_modified.format(LAST_MODIFIED_FORMAT).to_string(),
    );
    push_line(&mut out, "SEQUENCE", "0");
    push_line(&mut out, "STATUS", "CONFIRMED");
    push_line(&mut out, "SUMMARY", &name);
    push_line(&mut out, "TRANSP", "TRANSPARENT");
    out.push_str("END:VEVENT\n");
    out
}
