//! High-level client for the people directory.

use crate::config::{
    ApiConfiguration, FULLNAME_PARAM, ORGANIZATION_FILTER_PARAM, PAGE_PARAM, SEARCH_PARAM,
};
use crate::error::{DirectoryError, Result};
use crate::extract::{ExtractMode, Extracted, FieldExtractor};
use crate::fetch::DirectoryFetcher;
use crate::locator::{locate, LocatedRecord, SortKey};
use crate::page::{DirectoryPage, MemberRecord, PageRange};
use crate::resolver::resolve_page_range;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Field holding a member's numeric id.
pub const ID_FIELD: &str = "id";
/// Field holding a member's display name.
pub const FULLNAME_FIELD: &str = "fullname";
/// Field holding a member's research organizations.
pub const ORGANIZATIONS_FIELD: &str = "researchOrganizations";

/// How to find the research organization to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationQuery {
    /// The first organization of the person with this full name
    ByPerson(String),
    /// The organization with this name
    ByName(String),
    /// A known organization id
    ById(String),
}

/// Directory client built on an injected [`DirectoryFetcher`].
///
/// Page ranges are resolved once per sort key and cached for the lifetime of
/// the client.
pub struct DirectoryClient<F> {
    fetcher: F,
    base: ApiConfiguration,
    extractor: FieldExtractor,
    page_ranges: Mutex<HashMap<String, PageRange>>,
}

impl<F: DirectoryFetcher> DirectoryClient<F> {
    /// Create a client sending requests built from `base`.
    #[must_use]
    pub fn new(fetcher: F, base: ApiConfiguration) -> Self {
        Self {
            fetcher,
            base,
            extractor: FieldExtractor::default(),
            page_ranges: Mutex::new(HashMap::new()),
        }
    }

    /// Read localized names in `locale`.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.extractor = FieldExtractor::new(locale);
        self
    }

    /// Base configuration of every request.
    #[must_use]
    pub fn base(&self) -> &ApiConfiguration {
        &self.base
    }

    /// Extractor used for nested fields.
    #[must_use]
    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Seed the cache with a known range for `sort_key`.
    pub fn cache_page_range(&self, sort_key: &str, range: PageRange) {
        self.page_ranges
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sort_key.to_string(), range);
    }

    /// Cached range for `sort_key`, if resolved before.
    #[must_use]
    pub fn cached_page_range(&self, sort_key: &str) -> Option<PageRange> {
        self.page_ranges
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sort_key)
            .copied()
    }

    /// Page range of the collection sorted by `sort_key`, resolving it on first use.
    pub async fn page_range(&self, sort_key: &str) -> Result<PageRange> {
        if let Some(range) = self.cached_page_range(sort_key) {
            return Ok(range);
        }

        let config = self.base.clone().with_sort(sort_key);
        let range = resolve_page_range(&self.fetcher, &config).await?;
        self.cache_page_range(sort_key, range);
        Ok(range)
    }

    /// Binary-search the collection sorted by `sort_key` for `target`.
    pub async fn find_by_key<K: SortKey>(
        &self,
        sort_key: &str,
        target: &K,
    ) -> Result<LocatedRecord> {
        let range = self.page_range(sort_key).await?;
        locate(&self.fetcher, &self.base, range, sort_key, target).await
    }

    /// Locate a person by numeric id.
    pub async fn find_person(&self, person_id: i64) -> Result<LocatedRecord> {
        self.find_by_key(ID_FIELD, &person_id).await
    }

    /// Full name of the person with `person_id`.
    pub async fn person_name(&self, person_id: i64) -> Result<String> {
        let located = self.find_person(person_id).await?;
        match self
            .extractor
            .extract(&located.record, FULLNAME_FIELD, ExtractMode::First)
        {
            Extracted::Scalar(Value::String(name)) => Ok(name),
            _ => Err(DirectoryError::MalformedResponse {
                reason: format!("member {person_id} has no {FULLNAME_FIELD}"),
            }),
        }
    }

    /// Fetch a single page with `params` overlaid on the base configuration.
    pub async fn fetch_page<I, K, V>(&self, params: I) -> Result<DirectoryPage>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let config = self.base.derive(params);
        DirectoryPage::from_document(self.fetcher.fetch_config(&config).await?)
    }

    /// Members listed on the first page of an organization.
    pub async fn organization_members(&self, organization_id: &str) -> Result<Vec<MemberRecord>> {
        let page = self
            .fetch_page([(ORGANIZATION_FILTER_PARAM, organization_id)])
            .await?;
        Ok(page.members)
    }

    /// Every member of an organization, walking all pages the first page advertises.
    pub async fn all_organization_members(
        &self,
        organization_id: &str,
    ) -> Result<Vec<MemberRecord>> {
        let first = self
            .fetch_page([(ORGANIZATION_FILTER_PARAM, organization_id)])
            .await?;
        let Some(view) = first.view.as_ref() else {
            return Ok(first.members);
        };
        let range = view.page_range()?;

        let mut members = first.members;
        for page in range.first() + 1..=range.last() {
            let next = self
                .fetch_page([
                    (ORGANIZATION_FILTER_PARAM, organization_id.to_string()),
                    (PAGE_PARAM, page.to_string()),
                ])
                .await?;
            members.extend(next.members);
        }

        tracing::debug!(
            organization_id,
            pages = range.len(),
            members = members.len(),
            "Collected organization members"
        );
        Ok(members)
    }

    /// Id of the organization named `name`, searched on the first result page.
    pub async fn organization_id_by_name(&self, name: &str) -> Result<String> {
        let config = self.base.derive([(SEARCH_PARAM, name)]);
        let search = config.require_param(SEARCH_PARAM)?;

        let page = DirectoryPage::from_document(self.fetcher.fetch_config(&config).await?)?;
        page.members
            .iter()
            .flat_map(|member| self.extractor.all_refs(member, ORGANIZATIONS_FIELD))
            .find(|org| org.name.as_deref() == Some(search))
            .and_then(|org| org.id_text())
            .ok_or_else(|| DirectoryError::OrganizationNotFound {
                name: search.to_string(),
            })
    }

    /// Id of the first organization of the first person matching `fullname`.
    pub async fn organization_id_by_person(&self, fullname: &str) -> Result<String> {
        let config = self.base.derive([(FULLNAME_PARAM, fullname)]);
        config.require_param(FULLNAME_PARAM)?;

        let page = DirectoryPage::from_document(self.fetcher.fetch_config(&config).await?)?;
        page.members
            .first()
            .and_then(|member| self.extractor.first_ref(member, ORGANIZATIONS_FIELD))
            .and_then(|org| org.id_text())
            .ok_or_else(|| DirectoryError::MemberNotFound {
                query: format!("{FULLNAME_PARAM} = '{fullname}' with a research organization"),
            })
    }

    /// Resolve an [`OrganizationQuery`] to an organization id.
    pub async fn resolve_organization(&self, query: &OrganizationQuery) -> Result<String> {
        let id = match query {
            OrganizationQuery::ByPerson(fullname) => {
                self.organization_id_by_person(fullname).await?
            }
            OrganizationQuery::ByName(name) => self.organization_id_by_name(name).await?,
            OrganizationQuery::ById(id) => id.clone(),
        };
        tracing::info!(?query, organization_id = %id, "Resolved research organization");
        Ok(id)
    }
}
