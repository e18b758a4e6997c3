//! Paginated directory documents.
//!
//! The directory speaks Hydra: members live under `hydra:member` and the
//! pagination links under `hydra:view`.

use crate::error::{DirectoryError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

static PAGE_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"page=(\d+)").expect("valid page token regex"));

/// One directory entry, kept as the raw JSON object.
///
/// No schema is assumed beyond the fields a caller asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRecord(Map<String, Value>);

impl MemberRecord {
    /// Wrap a JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Convert a JSON value, failing unless it is an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(DirectoryError::MalformedResponse {
                reason: format!("member is not an object: {other}"),
            }),
        }
    }

    /// Look up a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The underlying JSON object.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for MemberRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Hypermedia links describing where a page sits in the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationView {
    /// Link to the current page
    #[serde(rename = "@id", default)]
    pub current: Option<String>,
    /// Link to the first page
    #[serde(rename = "hydra:first", default)]
    pub first: Option<String>,
    /// Link to the last page
    #[serde(rename = "hydra:last", default)]
    pub last: Option<String>,
    /// Link to the next page
    #[serde(rename = "hydra:next", default)]
    pub next: Option<String>,
    /// Link to the previous page
    #[serde(rename = "hydra:previous", default)]
    pub previous: Option<String>,
}

impl PaginationView {
    /// Page numbers of the first and last links.
    pub fn page_range(&self) -> Result<PageRange> {
        let first = Self::link_page(self.first.as_deref(), "hydra:first")?;
        let last = Self::link_page(self.last.as_deref(), "hydra:last")?;
        PageRange::new(first, last)
    }

    fn link_page(link: Option<&str>, name: &str) -> Result<u32> {
        let link = link.ok_or_else(|| DirectoryError::MalformedPaginationLinks {
            reason: format!("{name} is missing"),
        })?;
        extract_page_number(link).ok_or_else(|| DirectoryError::MalformedPaginationLinks {
            reason: format!("{name} has no page number: '{link}'"),
        })
    }
}

/// One page of a directory collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPage {
    /// Records on this page, in server order
    #[serde(rename = "hydra:member", default)]
    pub members: Vec<MemberRecord>,
    /// Pagination links, absent on single-page collections
    #[serde(rename = "hydra:view", default)]
    pub view: Option<PaginationView>,
    /// Size of the whole collection, when reported
    #[serde(rename = "hydra:totalItems", default)]
    pub total_items: Option<u64>,
}

impl DirectoryPage {
    /// Interpret a fetched JSON document as a page.
    pub fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| DirectoryError::MalformedResponse {
            reason: format!("unexpected directory page shape: {e}"),
        })
    }

    /// First and last page numbers advertised by this page.
    pub fn page_range(&self) -> Result<PageRange> {
        self.view
            .as_ref()
            .ok_or_else(|| DirectoryError::MalformedPaginationLinks {
                reason: "hydra:view is missing".to_string(),
            })?
            .page_range()
    }
}

/// Inclusive range of page numbers holding a sorted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRange {
    first: u32,
    last: u32,
}

impl PageRange {
    /// Create a range; pages are numbered from 1.
    ///
    /// # Errors
    /// Returns [`DirectoryError::MalformedPaginationLinks`] when `first` is 0
    /// or `last < first`.
    pub fn new(first: u32, last: u32) -> Result<Self> {
        if first == 0 || last < first {
            return Err(DirectoryError::MalformedPaginationLinks {
                reason: format!("invalid page range {first}..={last}"),
            });
        }
        Ok(Self { first, last })
    }

    /// First page number.
    #[must_use]
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Last page number.
    #[must_use]
    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of pages in the range.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Always false; a range holds at least one page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the page numbers.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Upper bound on page fetches for a binary search over this range:
    /// `ceil(log2(len)) + 1`.
    #[must_use]
    pub fn max_fetches(&self) -> u32 {
        let ceil_log2 = u32::BITS - (self.len() - 1).leading_zeros();
        ceil_log2 + 1
    }
}

/// Extract the number following `page=` in a pagination link.
///
/// ```rust
/// use roster_directory::extract_page_number;
///
/// assert_eq!(extract_page_number("/contacts?sort=id&page=10"), Some(10));
/// assert_eq!(extract_page_number("no page info"), None);
/// ```
#[must_use]
pub fn extract_page_number(link: &str) -> Option<u32> {
    PAGE_TOKEN_REGEX
        .captures(link)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_page_number() {
        assert_eq!(extract_page_number("page=3"), Some(3));
        assert_eq!(
            extract_page_number("/contact-search/contacts?sort=id&page=412"),
            Some(412)
        );
        assert_eq!(extract_page_number("no page info"), None);
        assert_eq!(extract_page_number("page="), None);
        assert_eq!(extract_page_number("page=99999999999999"), None);
    }

    #[test]
    fn test_page_range_from_view() {
        let page = DirectoryPage::from_document(json!({
            "hydra:view": {"hydra:first": "page=1", "hydra:last": "page=10"},
            "hydra:member": []
        }))
        .expect("valid page");

        let range = page.page_range().expect("range");
        assert_eq!((range.first(), range.last()), (1, 10));
        assert_eq!(range.len(), 10);
    }

    #[test]
    fn test_page_range_missing_view() {
        let page = DirectoryPage::from_document(json!({"hydra:member": []})).expect("valid page");
        assert!(matches!(
            page.page_range(),
            Err(DirectoryError::MalformedPaginationLinks { .. })
        ));
    }

    #[test]
    fn test_page_range_link_without_token() {
        let view = PaginationView {
            first: Some("/contacts?sort=id".to_string()),
            last: Some("/contacts?sort=id&page=4".to_string()),
            ..PaginationView::default()
        };
        let err = view.page_range().expect_err("first link has no page");
        assert!(err.to_string().contains("hydra:first"));
    }

    #[test]
    fn test_page_range_rejects_inverted_bounds() {
        assert!(PageRange::new(0, 3).is_err());
        assert!(PageRange::new(5, 4).is_err());
        assert!(PageRange::new(4, 4).is_ok());
    }

    #[test]
    fn test_max_fetches() {
        let bound = |first, last| PageRange::new(first, last).expect("range").max_fetches();
        assert_eq!(bound(1, 1), 1);
        assert_eq!(bound(1, 2), 2);
        assert_eq!(bound(1, 3), 3);
        assert_eq!(bound(1, 4), 3);
        assert_eq!(bound(1, 5), 4);
        assert_eq!(bound(7, 1030), 11);
    }

    #[test]
    fn test_members_default_to_empty() {
        let page = DirectoryPage::from_document(json!({"hydra:totalItems": 0})).expect("page");
        assert!(page.members.is_empty());
        assert_eq!(page.total_items, Some(0));
    }

    #[test]
    fn test_non_object_member_is_malformed() {
        let err = DirectoryPage::from_document(json!({"hydra:member": [1, 2]}))
            .expect_err("members must be objects");
        assert!(matches!(err, DirectoryError::MalformedResponse { .. }));
    }

    #[test]
    fn test_member_record_from_value() {
        let record = MemberRecord::from_value(json!({"id": 7, "fullname": "Ada"})).expect("object");
        assert_eq!(record.get("id"), Some(&json!(7)));
        assert!(MemberRecord::from_value(json!("nope")).is_err());
    }
}
