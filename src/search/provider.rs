use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to an encyclopedia backend.
///
/// None of these reach callers of the lookup service; they are logged and
/// turned into empty results or empty summaries.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl SearchError {
    /// Connection errors, timeouts and non-success statuses
    pub fn is_network(&self) -> bool {
        matches!(self, SearchError::Network(_) | SearchError::Status(_))
    }

    /// Malformed JSON or an unexpected payload shape
    pub fn is_parse(&self) -> bool {
        matches!(self, SearchError::Parse(_))
    }
}

/// A title returned by the search endpoint, in relevance order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[async_trait]
pub trait EncyclopediaSource: Send + Sync {
    /// Up to `count` titles matching `query`, most relevant first
    async fn open_search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError>;

    /// Plain-text summary for a single title
    async fn summary(&self, title: &str) -> Result<String, SearchError>;

    fn name(&self) -> &str;
}
