use crate::error::{Result, ScrapeError};
use roster_core::ScraperConfig;
use scraper::{Html, Selector};

pub struct PersonIdParser {
    container: Selector,
    id_attribute: String,
}

impl PersonIdParser {
    pub fn new(container_selector: &str, id_attribute: impl Into<String>) -> Result<Self> {
        let container =
            Selector::parse(container_selector).map_err(|e| ScrapeError::InvalidSelector {
                selector: container_selector.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            container,
            id_attribute: id_attribute.into(),
        })
    }

    pub fn from_settings(settings: &ScraperConfig) -> Result<Self> {
        Self::new(&settings.container_selector, settings.id_attribute.clone())
    }

    /// Ids of every matching container, in document order. Containers
    /// without the attribute, or with it empty, are skipped.
    pub fn parse(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.container)
            .filter_map(|container| container.value().attr(&self.id_attribute))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}
