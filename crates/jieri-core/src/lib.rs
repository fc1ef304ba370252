//! Festival Calendar Core Library
//!
//! This crate turns the festival list published on rili.com.cn
//! (节日大全) into an iCalendar document with one all-day event per
//! festival.
//!
//! # Features
//! - Parse `name[m月d日]` fragments into dated festivals
//! - Number festivals sharing a day so every event gets a unique UID
//! - Render `VEVENT` blocks and a complete `VCALENDAR` with a fixed UTC+8 zone
//! - Optional exclusion filter on festival names
//! - HTTP fetching with browser headers and retry, and atomic file output

pub mod client;
pub mod error;
pub mod filter;
pub mod ics;
pub mod numbering;
pub mod parser;
pub mod spider;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use client::{FetchConfig, HtmlFile, PageFetcher, RiliClient};
pub use error::{EntryDefect, JieriError, Result};
pub use filter::{ExclusionFilter, KeywordGroups, NoExclusion};
pub use ics::{build_calendar, BuildConfig, CalendarBuilder};
pub use spider::{GeneratedCalendar, Spider};
pub use types::{NumberedFestival, ParsedFestival, ScrapedPage, Strictness};
pub use writer::{calendar_file_name, FileWriter, FsWriter};
