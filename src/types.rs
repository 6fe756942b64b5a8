// Type definitions shared by the lookup service and the cache

use serde::{Deserialize, Serialize};

/// Number of results requested when the caller does not choose one
pub const DEFAULT_RESULT_COUNT: usize = 3;

/// Maximum number of distinct queries remembered per process
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Cache key: the query text together with the requested result count
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub text: String,
    pub count: usize,
}

impl Query {
    pub fn new(text: impl Into<String>, count: usize) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}

/// One retrieved encyclopedia entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub title: String,
    pub url: String,
    /// Lead-section extract; empty when the summary lookup failed
    pub summary: String,
}

impl ResultRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            summary: summary.into(),
        }
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}
