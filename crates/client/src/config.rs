//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CRM_API_BASE_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `CRM_CREDENTIALS_PATH` - Token file (default: `$CRM_HOME/credentials.json`)
//! - `CRM_HOME` - Console state directory (default: `$HOME/.crm-console`)
//! - `CRM_PAGE_SIZE` - Page size of the default order listing (default: 10, max 100)

use std::path::PathBuf;

use crm_core::PageRequest;
use crm_core::types::order::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const CREDENTIALS_FILE: &str = "credentials.json";
const HOME_DIR_NAME: &str = ".crm-console";
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`
    pub base_url: Url,
    /// File holding the persisted bearer token
    pub credentials_path: PathBuf,
    /// Page size of the default "all orders" listing
    pub page_size: u32,
}

impl ClientConfig {
    /// Create a configuration with the default page size.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` cannot serve as a base for
    /// endpoint paths (e.g. a `mailto:` URL).
    pub fn new(base_url: Url, credentials_path: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            credentials_path,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if no credentials
    /// path can be derived because neither `CRM_CREDENTIALS_PATH`,
    /// `CRM_HOME` nor `HOME` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_base_url = lookup("CRM_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&raw_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CRM_API_BASE_URL".to_string(), e.to_string()))?;
        let base_url = normalize_base_url(base_url)?;

        let credentials_path = match lookup("CRM_CREDENTIALS_PATH") {
            Some(path) => PathBuf::from(path),
            None => crm_home(&lookup)?.join(CREDENTIALS_FILE),
        };

        let page_size = match lookup("CRM_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            base_url,
            credentials_path,
            page_size,
        })
    }

    /// First page of the default order listing.
    #[must_use]
    pub const fn default_page(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }
}

fn crm_home(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(home) = lookup("CRM_HOME") {
        return Ok(PathBuf::from(home));
    }
    lookup("HOME")
        .map(|home| PathBuf::from(home).join(HOME_DIR_NAME))
        .ok_or_else(|| ConfigError::MissingEnvVar("HOME".to_string()))
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("CRM_PAGE_SIZE".to_string(), reason);
    let size = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(e.to_string()))?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(invalid(format!("must be between 1 and {MAX_PAGE_SIZE}")));
    }
    Ok(size)
}

/// Ensure the base URL can be joined with endpoint segments.
///
/// A trailing `/` is added so a base like `http://host/api` keeps its
/// `/api` prefix when segments are appended.
fn normalize_base_url(mut url: Url) -> Result<Url, ConfigError> {
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "CRM_API_BASE_URL".to_string(),
            format!("{url} cannot be used as a base URL"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
