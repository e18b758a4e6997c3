//! Fetching people pages over HTTP.

use crate::error::{Result, ScrapeError};
use crate::parser::PersonIdParser;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use roster_core::ScraperConfig;
use std::time::Duration;

/// Fetches a people page and extracts the listed person ids.
pub struct PeoplePageScraper {
    client: Client,
    parser: PersonIdParser,
}

impl PeoplePageScraper {
    /// Create a scraper using the selectors and timeout from `settings`.
    pub fn new(settings: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self {
            client,
            parser: PersonIdParser::from_settings(settings)?,
        })
    }

    /// Person ids listed on the page at `url`, in document order.
    ///
    /// Returns `Ok(None)` when the server answers with a non-success status.
    /// Caches are bypassed so a freshly edited page is seen immediately.
    pub async fn scrape(&self, url: &str) -> Result<Option<Vec<String>>> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Failed to retrieve people page");
            return Ok(None);
        }

        let html = response
            .text()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let ids = self.parser.parse(&html);
        tracing::debug!(url, count = ids.len(), "Scraped person ids");
        Ok(Some(ids))
    }
}
