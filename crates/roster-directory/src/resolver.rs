//! Page-range discovery for sorted collections.

use crate::config::{ApiConfiguration, PAGE_PARAM};
use crate::error::Result;
use crate::fetch::DirectoryFetcher;
use crate::page::{DirectoryPage, PageRange};

/// Discover the first and last page of the collection sorted by the
/// configuration's sort key.
///
/// Issues exactly one request: the first page at the default page size.
///
/// # Errors
/// - [`DirectoryError::MissingSortKey`](crate::DirectoryError::MissingSortKey)
///   before any request when no sort key is set
/// - [`DirectoryError::MalformedPaginationLinks`](crate::DirectoryError::MalformedPaginationLinks)
///   when the first/last links are missing or carry no page number
/// - [`DirectoryError::RequestFailed`](crate::DirectoryError::RequestFailed)
///   when the request fails
pub async fn resolve_page_range<F>(fetcher: &F, config: &ApiConfiguration) -> Result<PageRange>
where
    F: DirectoryFetcher + ?Sized,
{
    let sort_key = config.require_sort_key()?;
    let request = config.clone().without_param(PAGE_PARAM);

    let document = fetcher.fetch_config(&request).await?;
    let range = DirectoryPage::from_document(document)?.page_range()?;

    tracing::debug!(
        sort_key,
        first_page = range.first(),
        last_page = range.last(),
        "Resolved directory page range"
    );
    Ok(range)
}
