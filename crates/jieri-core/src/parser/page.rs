//! Festival list page parser
//!
//! Extracts the calendar year and the raw festival strings from the
//! rili.com.cn festival list page.

use chrono::{Datelike, NaiveDateTime};
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{JieriError, Result};
use crate::types::ScrapedPage;

/// Timestamp format of the `LastUpdate` meta tag, e.g. `2024/01/05 09:30:00`
const LAST_UPDATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Selector for the page update timestamp
const LAST_UPDATE_SELECTOR: &str = r#"meta[name="LastUpdate"]"#;

/// Selector for list items holding the festival text
const FESTIVAL_ITEM_SELECTOR: &str = "li.jr1";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| JieriError::ParseError(format!("Invalid selector: {:?}", e)))
}

/// Parse the festival list page.
///
/// # Arguments
/// * `html` - Raw HTML content of the festival list page
///
/// # Returns
/// * `Ok(ScrapedPage)` with the year and raw entries in page order
/// * `Err(JieriError::ElementNotFound)` if the `LastUpdate` meta tag is missing
/// * `Err(JieriError::ParseError)` if its timestamp cannot be read
pub fn parse_page(html: &str) -> Result<ScrapedPage> {
    let document = Html::parse_document(html);

    let year = parse_last_update_year(&document)?;

    let item_selector = selector(FESTIVAL_ITEM_SELECTOR)?;
    let text: String = document
        .select(&item_selector)
        .flat_map(|item| item.text())
        .collect();

    let entries = split_raw_entries(&text);
    debug!(year, entries = entries.len(), "parsed festival list page");

    Ok(ScrapedPage { year, entries })
}

/// Read the year from the page's `LastUpdate` meta tag.
pub fn parse_last_update_year(document: &Html) -> Result<i32> {
    let meta_selector = selector(LAST_UPDATE_SELECTOR)?;
    let content = document
        .select(&meta_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or_else(|| JieriError::ElementNotFound(LAST_UPDATE_SELECTOR.to_string()))?;

    let updated = NaiveDateTime::parse_from_str(content.trim(), LAST_UPDATE_FORMAT)
        .map_err(|e| JieriError::ParseError(format!("LastUpdate {:?}: {}", content, e)))?;

    Ok(updated.year())
}

/// Split the concatenated festival text into raw entries.
///
/// Entries are terminated by `]`; whatever follows the last `]` is not an
/// entry and is dropped, as are whitespace-only pieces.
///
/// # Examples
/// ```
/// use jieri_core::parser::split_raw_entries;
///
/// let entries = split_raw_entries("元旦[1月1日]腊八节[1月18日] 更多");
/// assert_eq!(entries, vec!["元旦[1月1日", "腊八节[1月18日"]);
/// ```
pub fn split_raw_entries(text: &str) -> Vec<String> {
    let mut pieces: Vec<&str> = text.split(']').collect();
    pieces.pop();

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <html>
        <head>
            <meta name="LastUpdate" content="2024/01/05 09:30:00">
        </head>
        <body>
            <ul>
                <li class="jr1"><a href="/a">元旦</a>[1月1日]</li>
                <li class="jr1"><a href="/b">春节</a>[2月10日]<a href="/c">小年</a>[2月10日]</li>
                <li class="jr2"><a href="/d">不相关</a>[3月3日]</li>
                <li class="jr1">
                    <a href="/e">国庆节</a>[10月1日]
                </li>
            </ul>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_page_sample() {
        let page = parse_page(SAMPLE_PAGE).unwrap();
        assert_eq!(page.year, 2024);
        assert_eq!(
            page.entries,
            vec!["元旦[1月1日", "春节[2月10日", "小年[2月10日", "国庆节[10月1日"]
        );
    }

    #[test]
    fn test_parse_page_missing_last_update() {
        let html = r#"<html><body><li class="jr1">元旦[1月1日]</li></body></html>"#;
        match parse_page(html) {
            Err(JieriError::ElementNotFound(what)) => assert!(what.contains("LastUpdate")),
            other => panic!("Expected ElementNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_page_bad_last_update() {
        let html = r#"<html><head><meta name="LastUpdate" content="yesterday"></head></html>"#;
        assert!(matches!(parse_page(html), Err(JieriError::ParseError(_))));
    }

    #[test]
    fn test_parse_page_without_festivals() {
        let html = r#"<html><head><meta name="LastUpdate" content="2025/12/31 23:59:59"></head><body></body></html>"#;
        let page = parse_page(html).unwrap();
        assert_eq!(page.year, 2025);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_split_raw_entries_drops_tail() {
        assert_eq!(split_raw_entries("元旦[1月1日]尾巴"), vec!["元旦[1月1日"]);
        assert!(split_raw_entries("没有结束符").is_empty());
        assert!(split_raw_entries("").is_empty());
    }

    #[test]
    fn test_split_raw_entries_skips_blank_pieces() {
        assert_eq!(
            split_raw_entries("元旦[1月1日]\n  ]春节[2月10日]"),
            vec!["元旦[1月1日", "春节[2月10日"]
        );
    }
}
