//! Calendar document assembly
//!
//! Runs raw festival entries through parsing, exclusion and numbering, and
//! wraps the rendered events in a `VCALENDAR` with a fixed UTC+8 timezone.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::{ExclusionFilter, NoExclusion};
use crate::numbering::number_festivals;
use crate::parser::parse_festival;
use crate::types::{NumberedFestival, Strictness};

use super::event::serialize_event;

/// Last line of every calendar
pub const CALENDAR_FOOTER: &str = "END:VCALENDAR\n";

/// Timezone the festival dates are published in
const TIMEZONE_ID: &str = "Asia/Shanghai";

/// Calendar header with name, description and timezone block.
///
/// The timezone is a single `STANDARD` rule at +0800 with no daylight
/// saving transition.
pub fn calendar_header(year: i32) -> String {
    format!(
        "BEGIN:VCALENDAR\n\
         PRODID:NULL\n\
         VERSION:2.0\n\
         CALSCALE:GREGORIAN\n\
         METHOD:PUBLISH\n\
         X-WR-CALNAME:{year}年节假日\n\
         X-WR-TIMEZONE:{tz}\n\
         X-WR-CALDESC:{year}年节假日\n\
         BEGIN:VTIMEZONE\n\
         TZID:{tz}\n\
         X-LIC-LOCATION:{tz}\n\
         BEGIN:STANDARD\n\
         TZOFFSETFROM:+0800\n\
         TZOFFSETTO:+0800\n\
         TZNAME:CST\n\
         DTSTART:19700101T000000\n\
         END:STANDARD\n\
         END:VTIMEZONE\n",
        year = year,
        tz = TIMEZONE_ID,
    )
}

/// Settings for one calendar build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// What to do with entries that cannot be parsed (default: Strict)
    pub strictness: Strictness,
    /// `LAST-MODIFIED` value written into every event
    pub last_modified: NaiveDateTime,
}

impl BuildConfig {
    /// Strict configuration stamped with the given generation time
    pub fn new(last_modified: NaiveDateTime) -> Self {
        Self {
            strictness: Strictness::default(),
            last_modified,
        }
    }
}

/// Turns raw festival entries into a complete calendar document
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use jieri_core::ics::{BuildConfig, CalendarBuilder};
/// use jieri_core::filter::KeywordGroups;
///
/// let generated = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let builder = CalendarBuilder::new(BuildConfig::new(generated))
///     .exclude_if(KeywordGroups::redaction_default());
///
/// let ics = builder.build(2024, &["元旦[1月1日]"]).unwrap();
/// assert!(ics.contains("UID:20240101T000001_jr"));
/// ```
pub struct CalendarBuilder {
    config: BuildConfig,
    exclusion: Box<dyn ExclusionFilter>,
}

impl CalendarBuilder {
    /// Create a builder that keeps every festival
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            exclusion: Box::new(NoExclusion),
        }
    }

    /// Replace the exclusion filter applied to festival names
    pub fn exclude_if(mut self, filter: impl ExclusionFilter + 'static) -> Self {
        self.exclusion = Box::new(filter);
        self
    }

    /// Change how malformed entries are handled
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.config.strictness = strictness;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Parse, filter and number raw entries without rendering them.
    ///
    /// # Errors
    /// `JieriError::MalformedEntry` for the first bad entry in strict mode.
    pub fn prepare<S: AsRef<str>>(&self, year: i32, entries: &[S]) -> Result<Vec<NumberedFestival>> {
        let mut festivals = Vec::with_capacity(entries.len());

        for raw in entries {
            let festival = match parse_festival(raw.as_ref(), year) {
                Ok(festival) => festival,
                Err(e) => match self.config.strictness {
                    Strictness::Strict => return Err(e),
                    Strictness::Lenient => {
                        warn!(error = %e, "skipping malformed festival entry");
                        continue;
                    }
                },
            };

            if self.exclusion.excludes(&festival.name) {
                debug!(name = %festival.name, "festival excluded by filter");
                continue;
            }

            festivals.push(festival);
        }

        let numbered = number_festivals(festivals);
        debug!(
            year,
            raw = entries.len(),
            kept = numbered.len(),
            "prepared festival entries"
        );
        Ok(numbered)
    }

    /// Render already numbered festivals as a calendar document.
    pub fn render(&self, year: i32, festivals: &[NumberedFestival]) -> String {
        let mut document = calendar_header(year);
        for festival in festivals {
            document.push_str(&serialize_event(festival, self.config.last_modified));
        }
        document.push_str(CALENDAR_FOOTER);
        document
    }

    /// Build the full calendar for `year` from raw entries.
    ///
    /// An empty entry list produces a calendar with no events.
    ///
    /// # Errors
    /// `JieriError::MalformedEntry` for the first bad entry in strict mode.
    pub fn build<S: AsRef<str>>(&self, year: i32, entries: &[S]) -> Result<String> {
        let festivals = self.prepare(year, entries)?;
        Ok(self.render(year, &festivals))
    }
}

impl fmt::Debug for CalendarBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build a calendar in strict mode with no exclusion filter.
pub fn build_calendar<S: AsRef<str>>(
    year: i32,
    entries: &[S],
    last_modified: NaiveDateTime,
) -> Result<String> {
    CalendarBuilder::new(BuildConfig::new(last_modified)).build(year, entries)
}
