//! Request configuration for the people directory.

use crate::error::{DirectoryError, Result};
use roster_core::DirectoryConfig;
use std::collections::BTreeMap;

/// Query parameter selecting the server-side sort key.
pub const SORT_PARAM: &str = "sort";
/// Query parameter selecting the page number.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying a free-text search term.
pub const SEARCH_PARAM: &str = "search";
/// Query parameter matching a person's full name.
pub const FULLNAME_PARAM: &str = "fullname";
/// Query parameter filtering members by research organization id.
pub const ORGANIZATION_FILTER_PARAM: &str = "researchOrganizations.id[]";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Endpoint, query parameters and headers for one kind of directory request.
///
/// Configurations are treated as immutable: every `with_*` method consumes
/// `self` and [`ApiConfiguration::derive`] copies before overlaying, so a
/// parent configuration is never changed by the requests built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfiguration {
    endpoint: String,
    params: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
}

impl ApiConfiguration {
    /// Create a configuration for `endpoint` with no parameters or headers.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }

    /// Create a configuration from the application settings.
    ///
    /// The API key header is only set when a key is configured.
    #[must_use]
    pub fn from_settings(settings: &DirectoryConfig) -> Self {
        let config = Self::new(settings.endpoint.clone());
        match &settings.api_key {
            Some(key) => config.with_header(API_KEY_HEADER, key.clone()),
            None => config,
        }
    }

    /// Set or replace a query parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Set or replace a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Drop a query parameter, if present.
    #[must_use]
    pub fn without_param(mut self, name: &str) -> Self {
        self.params.remove(name);
        self
    }

    /// Set the sort key.
    #[must_use]
    pub fn with_sort(self, key: impl Into<String>) -> Self {
        self.with_param(SORT_PARAM, key.into())
    }

    /// Copy this configuration and overlay `params` on the copy.
    #[must_use]
    pub fn derive<I, K, V>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(self.clone(), |config, (name, value)| config.with_param(name, value))
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// All query parameters.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// A single query parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The configured sort key, if any.
    #[must_use]
    pub fn sort_key(&self) -> Option<&str> {
        self.param(SORT_PARAM).filter(|key| !key.is_empty())
    }

    /// Guard for operations that cannot run without `name`.
    ///
    /// Empty values count as missing.
    pub fn require_param(&self, name: &str) -> Result<&str> {
        match self.param(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DirectoryError::MissingParameter {
                name: name.to_string(),
            }),
        }
    }

    /// Guard for operations that need a sort key.
    pub fn require_sort_key(&self) -> Result<&str> {
        self.sort_key().ok_or(DirectoryError::MissingSortKey)
    }
}
