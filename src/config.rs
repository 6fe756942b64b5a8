use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::types::DEFAULT_CACHE_CAPACITY;

pub const DEFAULT_SEARCH_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// OpenSearch endpoint (MediaWiki action API)
    pub search_url: String,
    /// Base of the per-title summary endpoint; the title is appended as a path segment
    pub summary_url: String,
    /// Applied separately to the search call and to each summary call
    pub timeout: Duration,
    pub cache_capacity: usize,
    pub user_agent: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            summary_url: DEFAULT_SUMMARY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            user_agent: format!("open-book/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RetrievalConfig {
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn with_summary_url(mut self, url: impl Into<String>) -> Self {
        self.summary_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load overrides from the environment (and a `.env` file if present).
    ///
    /// The library never calls this itself; hosts opt in.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = var("OPEN_BOOK_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(url) = var("OPEN_BOOK_SUMMARY_URL") {
            config.summary_url = url;
        }
        if let Some(secs) = var("OPEN_BOOK_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("OPEN_BOOK_TIMEOUT_SECS is not a number: {secs}"))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(capacity) = var("OPEN_BOOK_CACHE_CAPACITY") {
            config.cache_capacity = capacity
                .trim()
                .parse()
                .with_context(|| format!("OPEN_BOOK_CACHE_CAPACITY is not a number: {capacity}"))?;
        }
        if let Some(user_agent) = var("OPEN_BOOK_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}
