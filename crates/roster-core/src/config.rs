//! Configuration management for roster.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`DirectoryConfig::endpoint`].
pub const ENV_API_ENDPOINT: &str = "ROSTER_API_ENDPOINT";
/// Environment variable overriding [`DirectoryConfig::api_key`].
pub const ENV_API_KEY: &str = "ROSTER_API_KEY";
/// Environment variable overriding [`MailConfig::sendmail_path`].
pub const ENV_SENDMAIL: &str = "ROSTER_SENDMAIL";

/// Main application configuration.
///
/// This is loaded from `~/.config/roster/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote people directory settings
    pub directory: DirectoryConfig,
    /// People page scraping settings
    pub scraper: ScraperConfig,
    /// Report delivery settings
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if not found.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `ROSTER_API_ENDPOINT`: Override the directory endpoint
    /// - `ROSTER_API_KEY`: Provide the directory API key
    /// - `ROSTER_SENDMAIL`: Override the sendmail binary location
    pub fn load_with_env(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            tracing::debug!("Override directory.endpoint from env: {}", endpoint);
            self.directory.endpoint = endpoint;
        }

        if let Some(key) = lookup(ENV_API_KEY) {
            tracing::debug!("Override directory.api_key from env");
            self.directory.api_key = Some(key);
        }

        if let Some(path) = lookup(ENV_SENDMAIL) {
            tracing::debug!("Override mail.sendmail_path from env: {}", path);
            self.mail.sendmail_path = PathBuf::from(path);
        }
    }

    /// Check values that would only fail later, deep inside a run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.directory.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "directory.endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.directory.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "directory.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.scraper.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraper.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/roster/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "roster", "roster").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Remote people directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Collection endpoint of the people directory API
    pub endpoint: String,
    /// Value sent in the `x-api-key` header, if the API requires one
    pub api_key: Option<String>,
    /// Locale used when reading localized names
    pub locale: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://gw.api.helsinki.fi/contact-search/contacts".to_string(),
            api_key: None,
            locale: "en".to_string(),
            timeout_secs: 30,
            user_agent: concat!("roster/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// People page scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// People page compared against the directory
    pub website: String,
    /// CSS selector matching one container per listed person
    pub container_selector: String,
    /// Attribute on the container holding the person id
    pub id_attribute: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            website: "https://www.helsinki.fi/en/networks/centre-social-data-science/people"
                .to_string(),
            container_selector: "div.hy-person-container".to_string(),
            id_attribute: "data-person-id".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Report delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Sender address placed in the `From` header
    pub sender: String,
    /// Location of the sendmail binary
    pub sendmail_path: PathBuf,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: "me@example.com".to_string(),
            sendmail_path: PathBuf::from("/usr/lib/sendmail"),
        }
    }
}
