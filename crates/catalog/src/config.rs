//! Configuration for catalog client construction.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Public endpoint of the Perenual plant API
pub const DEFAULT_BASE_URL: &str = "https://perenual.com/api";

/// Overall request timeout unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pages the random pick chooses from
pub const RANDOM_PAGE_RANGE: RangeInclusive<u32> = 1..=100;

/// Configuration for the catalog client
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the API, without a trailing slash
    pub base_url: String,
    /// Credential sent as the `key` query parameter on every call
    pub api_key: String,
    /// Overall timeout of a single request
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl CatalogConfig {
    /// Create a config for the public API with the given credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("plant-favorites/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Point the client at another deployment of the API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the credential out of logs
impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
