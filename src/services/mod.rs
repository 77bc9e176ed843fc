pub mod fetch_service;
pub mod aggregate_service;
pub mod cache_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use fetch_service::{normalize_entries, FetchService, FEED_TIMEOUT_MS, MAX_ITEMS_PER_FEED};
pub use aggregate_service::AggregateService;
pub use cache_service::{CacheService, DIGEST_CONTENT_TYPE};
