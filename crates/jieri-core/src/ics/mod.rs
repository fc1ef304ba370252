//! iCalendar output
//!
//! - `event`: Render one numbered festival as a `VEVENT` block
//! - `document`: Assemble header, timezone, events and footer into a calendar

pub mod document;
pub mod event;

pub use document::{build_calendar, calendar_header, BuildConfig, CalendarBuilder, CALENDAR_FOOTER};
pub use event::{escape_text, event_uid, serialize_event, LAST_MODIFIED_FORMAT};
