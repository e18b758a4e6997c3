//! Binary search across the pages of a sorted collection.
//!
//! Correctness depends on the collection being contiguous: every key on
//! page N must be greater than or equal to every key on page N-1. The live
//! people directory is known to jump between id blocks, so a search over a
//! collection that breaks this ordering may report `OutOfRange` for a record
//! that exists.

use crate::config::{ApiConfiguration, PAGE_PARAM, SORT_PARAM};
use crate::error::{DirectoryError, Result};
use crate::fetch::DirectoryFetcher;
use crate::page::{DirectoryPage, MemberRecord, PageRange};
use serde_json::Value;
use std::fmt;

/// A value the directory can be sorted by.
pub trait SortKey: Ord + fmt::Display + Sized {
    /// Read the key from a record field, coercing where the directory is loose
    /// about types.
    fn from_json(value: &Value) -> Option<Self>;
}

impl SortKey for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl SortKey for String {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A record found by [`locate`], with the cost of finding it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedRecord {
    /// The matching record
    pub record: MemberRecord,
    /// Page the record was found on
    pub page: u32,
    /// Pages fetched during the search
    pub fetches: u32,
}

/// Locate the record whose `key` equals `target` within `range`.
///
/// Fetches one page per step, strictly in sequence, using the configuration
/// with `key` as sort parameter and the probed page number overlaid.
///
/// # Errors
/// - [`DirectoryError::OutOfRange`] when the bounds close without a match
/// - [`DirectoryError::RecordNotFoundOnExpectedPage`] when a page's first and
///   last keys enclose the target but none of its records match
/// - [`DirectoryError::MalformedResponse`] when a probed page is empty or a
///   record lacks a usable key
/// - [`DirectoryError::RequestFailed`] when a request fails
pub async fn locate<F, K>(
    fetcher: &F,
    config: &ApiConfiguration,
    range: PageRange,
    key: &str,
    target: &K,
) -> Result<LocatedRecord>
where
    F: DirectoryFetcher + ?Sized,
    K: SortKey,
{
    let mut low = range.first();
    let mut high = range.last();
    let mut fetches = 0_u32;

    while low <= high {
        let mid = low + (high - low) / 2;
        fetches += 1;

        let request = config.derive([(SORT_PARAM, key.to_string()), (PAGE_PARAM, mid.to_string())]);
        let page = DirectoryPage::from_document(fetcher.fetch_config(&request).await?)?;
        let (start, end) = page_bounds::<K>(&page, key, mid)?;

        tracing::debug!(page = mid, low, high, %start, %end, %target, "Probed directory page");

        if *target < start {
            high = mid - 1;
        } else if *target > end {
            low = mid + 1;
        } else {
            for record in page.members {
                if sort_value::<K>(&record, key, mid)? == *target {
                    tracing::info!(
                        key,
                        %target,
                        page = mid,
                        fetches,
                        "Binary search converged"
                    );
                    return Ok(LocatedRecord {
                        record,
                        page: mid,
                        fetches,
                    });
                }
            }
            return Err(DirectoryError::RecordNotFoundOnExpectedPage {
                key: key.to_string(),
                target: target.to_string(),
                page: mid,
            });
        }
    }

    Err(DirectoryError::OutOfRange {
        key: key.to_string(),
        target: target.to_string(),
        fetches,
    })
}

fn page_bounds<K: SortKey>(page: &DirectoryPage, key: &str, number: u32) -> Result<(K, K)> {
    match (page.members.first(), page.members.last()) {
        (Some(first), Some(last)) => Ok((
            sort_value(first, key, number)?,
            sort_value(last, key, number)?,
        )),
        _ => Err(DirectoryError::MalformedResponse {
            reason: format!("page {number} inside the page range has no members"),
        }),
    }
}

fn sort_value<K: SortKey>(record: &MemberRecord, key: &str, number: u32) -> Result<K> {
    record
        .get(key)
        .and_then(K::from_json)
        .ok_or_else(|| DirectoryError::MalformedResponse {
            reason: format!("member on page {number} has no usable '{key}' value"),
        })
}
