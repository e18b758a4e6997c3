//! Roster Directory - paginated people-directory resolution.
//!
//! This crate locates single records inside a large, sorted, paginated
//! remote directory without downloading all of it, and reconciles the
//! directory's identifiers against lists obtained elsewhere.
//!
//! # Features
//!
//! - **Page-range discovery** from Hydra `first`/`last` pagination links
//! - **Binary search** across pages by a monotonic sort key, one fetch per step
//! - **Nested-field extraction** of `{id, name}` pairs from irregular records
//! - **Reconciliation** of directory identifiers against a reference list
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_directory::{ApiConfiguration, DirectoryClient, HttpFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base = ApiConfiguration::new("https://gw.api.helsinki.fi/contact-search/contacts")
//!     .with_header("x-api-key", "…");
//! let client = DirectoryClient::new(HttpFetcher::new()?, base);
//!
//! let person = client.find_person(9_077_557).await?;
//! println!("found on page {} after {} fetches", person.page, person.fetches);
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! The search is only correct while the collection is contiguous in its sort
//! key across pages. See [`locator`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locator;
pub mod page;
pub mod reconcile;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use client::{DirectoryClient, OrganizationQuery, FULLNAME_FIELD, ID_FIELD, ORGANIZATIONS_FIELD};
pub use config::ApiConfiguration;
pub use error::{DirectoryError, ErrorKind, Result};
pub use extract::{ExtractMode, Extracted, FieldExtractor, NamedRef};
pub use fetch::{DirectoryFetcher, HttpFetcher};
pub use locator::{locate, LocatedRecord, SortKey};
pub use page::{extract_page_number, DirectoryPage, MemberRecord, PageRange, PaginationView};
pub use reconcile::{identifier_text, reconcile, Reconciliation};
pub use resolver::resolve_page_range;
