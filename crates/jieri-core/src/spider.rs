//! Festival calendar pipeline
//!
//! This module ties the collaborators together: fetch the festival page,
//! scrape it, build the calendar and hand the result to a writer.

use std::path::PathBuf;

use tracing::info;

use crate::client::PageFetcher;
use crate::error::Result;
use crate::ics::CalendarBuilder;
use crate::parser::parse_page;
use crate::types::{NumberedFestival, ScrapedPage};
use crate::writer::{calendar_file_name, FileWriter};

/// A calendar ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCalendar {
    /// Calendar year
    pub year: i32,
    /// File name the calendar is published under
    pub file_name: String,
    /// Full ICS text
    pub contents: String,
    /// Number of events in the calendar
    pub event_count: usize,
}

/// Runs the fetch, scrape, build and write stages
///
/// # Example
/// ```no_run
/// use chrono::Local;
/// use jieri_core::ics::{BuildConfig, CalendarBuilder};
/// use jieri_core::{FsWriter, RiliClient, Spider};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let builder = CalendarBuilder::new(BuildConfig::new(Local::now().naive_local()));
///     let spider = Spider::new(RiliClient::new()?, FsWriter::new("."), builder);
///
///     let path = spider.run().await?;
///     println!("wrote {}", path.display());
///     Ok(())
/// }
/// ```
pub struct Spider<F, W> {
    fetcher: F,
    writer: W,
    builder: CalendarBuilder,
}

impl<F: PageFetcher, W: FileWriter> Spider<F, W> {
    /// Create a pipeline from its collaborators
    pub fn new(fetcher: F, writer: W, builder: CalendarBuilder) -> Self {
        Self {
            fetcher,
            writer,
            builder,
        }
    }

    /// Fetch and scrape the festival page.
    ///
    /// # Errors
    /// Fetch and page-structure errors; no calendar work is attempted.
    pub async fn scrape(&self) -> Result<ScrapedPage> {
        let html = self.fetcher.fetch().await?;
        parse_page(&html)
    }

    /// Scrape the page and parse, filter and number its festivals.
    pub async fn festivals(&self) -> Result<(i32, Vec<NumberedFestival>)> {
        let page = self.scrape().await?;
        let festivals = self.builder.prepare(page.year, &page.entries)?;
        Ok((page.year, festivals))
    }

    /// Scrape the page and build the calendar without writing it.
    pub async fn generate(&self) -> Result<GeneratedCalendar> {
        let (year, festivals) = self.festivals().await?;
        let contents = self.builder.render(year, &festivals);

        Ok(GeneratedCalendar {
            year,
            file_name: calendar_file_name(year),
            contents,
            event_count: festivals.len(),
        })
    }

    /// Run the whole pipeline and write the calendar.
    ///
    /// Nothing is written when any earlier stage fails.
    ///
    /// # Returns
    /// Path of the written calendar
    pub async fn run(&self) -> Result<PathBuf> {
        let calendar = self.generate().await?;
        info!(
            year = calendar.year,
            events = calendar.event_count,
            "generated festival calendar"
        );
        self.writer.write(&calendar.file_name, &calendar.contents)
    }
}
