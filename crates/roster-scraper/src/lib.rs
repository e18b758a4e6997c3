//! Roster Scraper - person ids from a public people page.
//!
//! People pages list each person in a container element carrying the
//! person's directory id as an attribute. This crate fetches such a page and
//! collects those ids in document order, so they can be reconciled against
//! the directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_core::ScraperConfig;
//! use roster_scraper::PeoplePageScraper;
//!
//! let settings = ScraperConfig::default();
//! let scraper = PeoplePageScraper::new(&settings)?;
//!
//! match scraper.scrape(&settings.website).await? {
//!     Some(ids) => println!("{} people listed", ids.len()),
//!     None => println!("page unavailable"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod parser;
pub mod scrape;

// Re-export commonly used types
pub use error::{Result, ScrapeError};
pub use parser::PersonIdParser;
pub use scrape::PeoplePageScraper;
