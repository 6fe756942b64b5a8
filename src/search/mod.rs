//! Search Module
//!
//! Fetches short encyclopedic summaries to use as background context:
//! - `wikipedia` talks to the OpenSearch and page-summary endpoints
//! - `cache` bounds the per-process memo of lookups
//! - `service` ties them together and never surfaces errors to callers

pub mod cache;
pub mod provider;
pub mod service;
pub mod wikipedia;

pub use cache::{CachedResults, ResultCache};
pub use provider::{EncyclopediaSource, SearchError, SearchHit};
pub use service::{format_context, LookupService};
pub use wikipedia::WikipediaClient;

use std::sync::OnceLock;
use tracing::error;

use crate::config::RetrievalConfig;
use crate::types::{ResultRecord, DEFAULT_RESULT_COUNT};

static DEFAULT_SERVICE: OnceLock<Option<LookupService>> = OnceLock::new();

fn default_service() -> Option<&'static LookupService> {
    DEFAULT_SERVICE
        .get_or_init(|| match LookupService::new(RetrievalConfig::default()) {
            Ok(service) => Some(service),
            Err(e) => {
                error!(error = %e, "Failed to initialize lookup service, lookups will be empty");
                None
            }
        })
        .as_ref()
}

/// Top `count` Wikipedia matches for `query`, with summaries.
///
/// Uses a process-wide service and cache built on first use.
pub async fn search(query: &str, count: usize) -> Vec<ResultRecord> {
    if query.is_empty() {
        return Vec::new();
    }

    match default_service() {
        Some(service) => service.search(query, count).await,
        None => Vec::new(),
    }
}

/// [`search`] with the default result count
pub async fn search_top(query: &str) -> Vec<ResultRecord> {
    search(query, DEFAULT_RESULT_COUNT).await
}
