use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::types::{Query, ResultRecord};

/// Result sets are frozen once cached; readers clone out of the shared slice.
pub type CachedResults = Arc<[ResultRecord]>;

/// Bounded least-recently-used memo of lookups, shared across threads.
///
/// The lock is only held for the map operation itself, never across a network call.
pub struct ResultCache {
    entries: Mutex<LruCache<Query, CachedResults>>,
}

impl ResultCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up `query`, marking it as most recently used.
    pub fn get(&self, query: &Query) -> Option<CachedResults> {
        self.lock().get(query).cloned()
    }

    /// Store `results`, evicting the least recently used entry when full.
    pub fn insert(&self, query: Query, results: CachedResults) {
        let mut entries = self.lock();
        let replacing = entries.contains(&query);
        if let Some((evicted, _)) = entries.push(query, results) {
            if !replacing {
                debug!(query = %evicted.text, count = evicted.count, "Evicted cached lookup");
            }
        }
    }

    /// Membership test that leaves recency untouched.
    pub fn contains(&self, query: &Query) -> bool {
        self.lock().contains(query)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Entries are immutable values, so a panic elsewhere cannot leave them half-written.
    fn lock(&self) -> MutexGuard<'_, LruCache<Query, CachedResults>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
