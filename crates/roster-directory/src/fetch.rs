//! HTTP boundary of the directory client.

use crate::config::ApiConfiguration;
use crate::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use roster_core::DirectoryConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Capability to fetch one JSON document from the directory.
///
/// The resolver, locator and client only ever talk to the directory through
/// this trait, so tests can substitute an in-memory directory.
#[async_trait]
pub trait DirectoryFetcher: Send + Sync {
    /// Fetch `endpoint` with the given headers and query parameters.
    ///
    /// # Errors
    /// Returns [`DirectoryError::RequestFailed`] on transport failures and
    /// non-success statuses, and [`DirectoryError::MalformedResponse`] when
    /// the body is not JSON.
    async fn fetch(
        &self,
        endpoint: &str,
        headers: &BTreeMap<String, String>,
        params: &BTreeMap<String, String>,
    ) -> Result<Value>;

    /// Fetch the document described by `config`.
    async fn fetch_config(&self, config: &ApiConfiguration) -> Result<Value> {
        self.fetch(config.endpoint(), config.headers(), config.params())
            .await
    }
}

#[async_trait]
impl<T: DirectoryFetcher + ?Sized> DirectoryFetcher for Arc<T> {
    async fn fetch(
        &self,
        endpoint: &str,
        headers: &BTreeMap<String, String>,
        params: &BTreeMap<String, String>,
    ) -> Result<Value> {
        (**self).fetch(endpoint, headers, params).await
    }
}

/// [`DirectoryFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::from_settings(&DirectoryConfig::default())
    }

    /// Create a fetcher using the timeout and user agent from `settings`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_settings(settings: &DirectoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| DirectoryError::RequestFailed {
                endpoint: settings.endpoint.clone(),
                status: None,
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DirectoryFetcher for HttpFetcher {
    async fn fetch(
        &self,
        endpoint: &str,
        headers: &BTreeMap<String, String>,
        params: &BTreeMap<String, String>,
    ) -> Result<Value> {
        tracing::debug!(endpoint, ?params, "Requesting directory document");

        let mut request = self.client.get(endpoint).query(params);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::request_failed(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(DirectoryError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::request_failed(endpoint, &e))?;

        serde_json::from_str(&body).map_err(|e| DirectoryError::MalformedResponse {
            reason: format!("response from {endpoint} is not JSON: {e}"),
        })
    }
}
