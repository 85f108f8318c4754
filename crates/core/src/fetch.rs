//! Downloading articles into the working directory.
//!
//! [`fetch_url`] retrieves a page body; [`download_article`] additionally
//! names the page after its title and stores the raw HTML on disk.

use std::fs;
use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::parse::Document;
use crate::sanitize::sanitize_title;
use crate::workdir::WorkDir;
use crate::{KindlerError, Result};

/// Stem used when a page has no usable title.
pub const DEFAULT_TITLE: &str = "article";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Kindler/0.1)".to_string(),
        }
    }
}

/// A page saved to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    /// File name of the stored HTML, relative to the working directory.
    pub file_name: String,
    /// Sanitized title the file name was derived from.
    pub title: String,
}

/// Parses and checks a URL, accepting only `http` and `https`.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| KindlerError::InvalidUrl(e.to_string()))?;
    check_scheme(&parsed)?;
    Ok(parsed)
}

pub(crate) fn check_scheme(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(KindlerError::InvalidUrl(format!(
            "unsupported scheme `{other}`, expected http or https"
        ))),
    }
}

/// Fetches HTML content from a URL.
///
/// Non-success status codes are reported as [`KindlerError::HttpError`] just
/// like network failures.
pub async fn fetch_url(url: &Url, config: &FetchConfig) -> Result<String> {
    check_scheme(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(KindlerError::HttpError)?;

    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| {
            if e.is_timeout() {
                KindlerError::Timeout { timeout: config.timeout }
            } else {
                KindlerError::HttpError(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Downloads a page and stores it as `<sanitized title>.html`.
///
/// The title falls back to [`DEFAULT_TITLE`] when the page has none or when
/// it sanitizes to nothing. No file is created if the download fails.
pub async fn download_article(url: &Url, workdir: &WorkDir, config: &FetchConfig) -> Result<SavedPage> {
    let html = match fetch_url(url, config).await {
        Ok(html) => html,
        Err(e) => {
            error!("An error occurred while downloading the HTML content: {e}");
            return Err(e);
        }
    };

    let title = page_stem(&html);
    let file_name = workdir.allocate(&title, "html")?;
    fs::write(workdir.path(&file_name), &html)?;
    info!("HTML content downloaded with title: {title}");

    Ok(SavedPage { file_name, title })
}

/// File stem for a page: its sanitized title, or [`DEFAULT_TITLE`].
pub fn page_stem(html: &str) -> String {
    Document::parse(html)
        .title()
        .map(|title| sanitize_title(&title))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
