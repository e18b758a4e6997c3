//! In-memory directory used by the unit tests.

use crate::config::PAGE_PARAM;
use crate::error::Result;
use crate::fetch::DirectoryFetcher;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Serves fixed pages by the `page` query parameter and records every request.
pub(crate) struct PagedDirectory {
    pages: Vec<Vec<Value>>,
    requests: Mutex<Vec<BTreeMap<String, String>>>,
}

impl PagedDirectory {
    pub(crate) fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pages of `{"id": n}` records.
    pub(crate) fn with_ids(pages: &[&[i64]]) -> Self {
        Self::new(
            pages
                .iter()
                .map(|ids| ids.iter().map(|id| json!({ "id": id })).collect())
                .collect(),
        )
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub(crate) fn requests(&self) -> Vec<BTreeMap<String, String>> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Page numbers requested, in order; `None` for requests without a page.
    pub(crate) fn requested_pages(&self) -> Vec<Option<u32>> {
        self.requests()
            .iter()
            .map(|params| params.get(PAGE_PARAM).and_then(|p| p.parse().ok()))
            .collect()
    }
}

#[async_trait]
impl DirectoryFetcher for PagedDirectory {
    async fn fetch(
        &self,
        _endpoint: &str,
        _headers: &BTreeMap<String, String>,
        params: &BTreeMap<String, String>,
    ) -> Result<Value> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(params.clone());

        let page: usize = params
            .get(PAGE_PARAM)
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        let members = page
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .unwrap_or_default();

        Ok(json!({
            "hydra:member": members,
            "hydra:totalItems": self.pages.iter().map(Vec::len).sum::<usize>(),
            "hydra:view": {
                "@id": format!("/contacts?page={page}"),
                "hydra:first": "/contacts?page=1",
                "hydra:last": format!("/contacts?page={}", self.pages.len().max(1)),
            }
        }))
    }
}
