//! Page fetching for the festival list
//!
//! This module provides the HTTP client that downloads the rili.com.cn
//! festival page with browser-like headers and retries transient errors
//! with exponential backoff, plus a file-backed fetcher for offline runs.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{JieriError, Result};

/// Festival list page on rili.com.cn
pub const DEFAULT_PAGE_URL: &str = "https://www.rili.com.cn/jieridaquan/";

/// Default User-Agent mimicking a desktop Chrome
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0.4844.51 Safari/537.36";

/// Accept header sent by the browser for page navigations
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Accept-Language header for Chinese content
const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";

/// Referer the site expects on page requests
const DEFAULT_REFERER: &str = "https://www.rili.com.cn";

/// Source of the festival list page HTML
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw HTML of the festival list page
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Configuration for the festival page HTTP client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Page to download (default: rili.com.cn festival list)
    pub url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retry attempts for 429 and 5xx responses (default: 3)
    pub max_retries: u32,
    /// First backoff delay in milliseconds, doubled per retry (default: 1000)
    pub base_retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PAGE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            base_retry_delay_ms: 1000,
        }
    }
}

/// HTTP client for the festival list page
///
/// This client automatically:
/// - Sends the browser headers the site expects
/// - Retries on transient errors (429, 5xx) with exponential backoff
/// - Maps 404 to `JieriError::NotFound`
pub struct RiliClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Client configuration
    config: FetchConfig,
}

impl RiliClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));
        headers.insert(REFERER, HeaderValue::from_static(DEFAULT_REFERER));

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Internal method to fetch with retry logic
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            debug!(url, attempt, "requesting festival page");
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                let body = response.text().await?;
                info!(url, bytes = body.len(), "fetched festival page");
                return Ok(body);
            }

            // Handle 404 - Not Found (no retry)
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(JieriError::NotFound(url.to_string()));
            }

            let transient =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if transient && attempt < self.config.max_retries {
                let delay = self.calculate_backoff_delay(attempt);
                warn!(url, %status, ?delay, "transient error, retrying");
                sleep(delay).await;
                return self.fetch_with_retry(url, attempt + 1).await;
            }

            match response.error_for_status() {
                Err(e) => Err(JieriError::HttpError(e)),
                Ok(response) => Err(JieriError::ParseError(format!(
                    "unexpected status {} from {}",
                    response.status(),
                    url
                ))),
            }
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base, 2*base, 4*base, ...
        let delay_ms = self.config.base_retry_delay_ms * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }
}

impl PageFetcher for RiliClient {
    async fn fetch(&self) -> Result<String> {
        self.fetch_with_retry(&self.config.url, 0).await
    }
}

/// Reads a previously saved copy of the festival page from disk
#[derive(Debug, Clone)]
pub struct HtmlFile {
    path: PathBuf,
}

impl HtmlFile {
    /// Create a fetcher for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageFetcher for HtmlFile {
    async fn fetch(&self) -> Result<String> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        info!(path = %self.path.display(), bytes = html.len(), "read festival page from file");
        Ok(html)
    }
}
