// Open Book - cached encyclopedic background lookups for text generation

pub mod config;
pub mod types;
pub mod search;    // Wikipedia client, bounded cache and lookup service
pub mod utils;

// Re-exports for convenience
pub use config::RetrievalConfig;
pub use search::{format_context, search, search_top, LookupService, SearchError};
pub use types::{Query, ResultRecord, DEFAULT_CACHE_CAPACITY, DEFAULT_RESULT_COUNT};
