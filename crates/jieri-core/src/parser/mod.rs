//! Parsers for the festival list page
//!
//! This module contains the two text-processing stages in front of the
//! calendar builder:
//! - `page`: Extract the year and raw festival strings from page HTML
//! - `fragment`: Turn one raw `name[date` string into a dated festival

pub mod fragment;
pub mod page;

// Re-export main parsing functions
pub use fragment::{clean_festival_name, extract_month_day, parse_festival};
pub use page::{parse_last_update_year, parse_page, split_raw_entries};
