//! Lookup Service
//!
//! Caching decorator over an [`EncyclopediaSource`]. A lookup is one search
//! request followed by one summary request per returned title, issued in order.
//! Failures never reach the caller:
//! - a failed search yields an empty result set, which is cached like any other
//! - a failed summary yields an empty `summary` on that record only

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::RetrievalConfig;
use crate::search::cache::{CachedResults, ResultCache};
use crate::search::provider::{EncyclopediaSource, SearchError};
use crate::search::wikipedia::WikipediaClient;
use crate::types::{Query, ResultRecord};

pub struct LookupService {
    source: Box<dyn EncyclopediaSource>,
    cache: ResultCache,
}

impl LookupService {
    /// Wikipedia-backed service
    pub fn new(config: RetrievalConfig) -> Result<Self, SearchError> {
        let client = WikipediaClient::new(&config)?;
        Ok(Self::with_source(Box::new(client), config.cache_capacity))
    }

    pub fn with_source(source: Box<dyn EncyclopediaSource>, cache_capacity: usize) -> Self {
        Self {
            source,
            cache: ResultCache::new(cache_capacity),
        }
    }

    /// Top `count` matches for `query`, each with its summary.
    ///
    /// Repeated calls with the same arguments are served from the cache. The
    /// returned records are owned copies; changing them does not affect the cache.
    pub async fn search(&self, query: &str, count: usize) -> Vec<ResultRecord> {
        if query.is_empty() {
            return Vec::new();
        }

        let key = Query::new(query, count);
        if let Some(cached) = self.cache.get(&key) {
            debug!(query = %query, count, results = cached.len(), "Lookup served from cache");
            return cached.to_vec();
        }

        let results = self.fetch(query, count).await;
        self.cache.insert(key, Arc::clone(&results));
        results.to_vec()
    }

    async fn fetch(&self, query: &str, count: usize) -> CachedResults {
        info!(query = %query, count, source = self.source.name(), "Looking up background context");

        let hits = match self.source.open_search(query, count).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed, caching empty result");
                return Arc::from(Vec::<ResultRecord>::new());
            }
        };

        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            debug!(title = %hit.title, "Fetching summary");
            let summary = match self.source.summary(&hit.title).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(title = %hit.title, error = %e, "Summary unavailable");
                    String::new()
                }
            };
            records.push(ResultRecord {
                title: hit.title,
                url: hit.url,
                summary,
            });
        }

        info!(query = %query, results = records.len(), "Lookup completed");
        Arc::from(records)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Render records as a background block for a generation prompt
pub fn format_context(records: &[ResultRecord]) -> String {
    if records.is_empty() {
        return "No background context available.".to_string();
    }

    let mut output = String::from("### Background\n");
    for record in records {
        output.push_str(&format!("- **{}** ({})\n", record.title, record.url));
        if record.has_summary() {
            output.push_str(&format!("  {}\n", record.summary));
        }
    }
    output
}
