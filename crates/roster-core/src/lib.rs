//! Roster Core - shared configuration for the roster workspace.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and environment overrides
//!
//! # Example
//!
//! ```rust
//! use roster_core::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.directory.locale, "en");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{AppConfig, DirectoryConfig, MailConfig, ScraperConfig};
pub use error::{ConfigError, ConfigResult};
