//! Data types for the festival calendar generator
//!
//! This module contains the core data structures flowing through the
//! pipeline. All types implement Serialize and Deserialize for JSON output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format used for all-day dates in the calendar (`YYYYMMDD`)
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// A festival with a normalized date, before numbering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFestival {
    /// Festival name with brackets and surrounding whitespace removed
    pub name: String,
    /// Calendar day of the festival within the target year
    pub date: NaiveDate,
}

impl ParsedFestival {
    /// Create a new parsed festival
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }

    /// Date rendered as an 8-digit `YYYYMMDD` string
    pub fn date_stamp(&self) -> String {
        self.date.format(DATE_STAMP_FORMAT).to_string()
    }
}

/// A festival annotated with its position among festivals on the same day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedFestival {
    /// The dated festival
    #[serde(flatten)]
    pub festival: ParsedFestival,
    /// 1-based index within the festivals sharing `festival.date`
    pub sequence: u32,
}

impl NumberedFestival {
    /// Festival name
    pub fn name(&self) -> &str {
        &self.festival.name
    }

    /// Festival date
    pub fn date(&self) -> NaiveDate {
        self.festival.date
    }

    /// Date rendered as an 8-digit `YYYYMMDD` string
    pub fn date_stamp(&self) -> String {
        self.festival.date_stamp()
    }
}

/// What the scraper extracts from the festival list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Year the page was last updated, taken as the calendar year
    pub year: i32,
    /// Raw `name[date` strings in page order
    pub entries: Vec<String>,
}

/// What the calendar builder does with an entry it cannot parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strictness {
    /// Abort the whole build on the first malformed entry
    #[default]
    Strict,
    /// Log the malformed entry and leave it out of the calendar
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_stamp_is_zero_padded() {
        let festival = ParsedFestival::new("元旦", date(2024, 1, 1));
        assert_eq!(festival.date_stamp(), "20240101");
    }

    #[test]
    fn test_numbered_festival_accessors() {
        let numbered = NumberedFestival {
            festival: ParsedFestival::new("国庆节", date(2024, 10, 1)),
            sequence: 3,
        };
        assert_eq!(numbered.name(), "国庆节");
        assert_eq!(numbered.date(), date(2024, 10, 1));
        assert_eq!(numbered.date_stamp(), "20241001");
    }

    #[test]
    fn test_numbered_festival_serialization_is_flat() {
        let numbered = NumberedFestival {
            festival: ParsedFestival::new("元旦", date(2024, 1, 1)),
            sequence: 1,
        };

        let json = serde_json::to_value(&numbered).unwrap();
        assert_eq!(json["name"], "元旦");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["sequence"], 1);

        let back: NumberedFestival = serde_json::from_value(json).unwrap();
        assert_eq!(back, numbered);
    }

    #[test]
    fn test_strictness_default_is_strict() {
        assert_eq!(Strictness::default(), Strictness::Strict);
    }

    #[test]
    fn test_scraped_page_serialization() {
        let page = ScrapedPage {
            year: 2024,
            entries: vec!["元旦[1月1日".to_string()],
        };
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"year":2024,"entries":["元旦[1月1日"]}"#);
    }
}
