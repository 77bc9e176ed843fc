use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::{Clock, FeedDescriptor, NewsItem};
use crate::errors::{DigestError, DigestResult};
use crate::sources::{FeedEntry, FeedSource};

pub const FEED_TIMEOUT_MS: u64 = 5000;
pub const MAX_ITEMS_PER_FEED: usize = 3;

/// Fetches one feed under a deadline, absorbing every failure
pub struct FetchService {
    source: Arc<dyn FeedSource>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl FetchService {
    pub fn new(source: Arc<dyn FeedSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            timeout: Duration::from_millis(FEED_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch at most [`MAX_ITEMS_PER_FEED`] items. Errors and timeouts are
    /// logged and yield an empty list.
    pub async fn fetch(&self, feed: &FeedDescriptor) -> Vec<NewsItem> {
        match self.try_fetch(feed).await {
            Ok(items) => {
                debug!(feed = %feed.name, items = items.len(), "Feed fetched");
                items
            }
            Err(e) => {
                error!(feed = %feed.name, error = %e, "Feed failed or timed out");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, feed: &FeedDescriptor) -> DigestResult<Vec<NewsItem>> {
        // Dropping the losing fetch future aborts the request
        let entries = tokio::time::timeout(self.timeout, self.source.fetch_entries(feed))
            .await
            .map_err(|_| self.timeout_error(feed))??;

        Ok(normalize_entries(&feed.name, entries, self.clock.now()))
    }

    fn timeout_error(&self, feed: &FeedDescriptor) -> DigestError {
        DigestError::FeedTimeout {
            feed: feed.name.clone(),
            timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Map the first entries of a feed onto digest items, dating undated
/// entries at `fetched_at`
pub fn normalize_entries(
    source: &str,
    entries: Vec<FeedEntry>,
    fetched_at: DateTime<Utc>,
) -> Vec<NewsItem> {
    entries
        .into_iter()
        .take(MAX_ITEMS_PER_FEED)
        .map(|entry| {
            NewsItem::new(source, entry.published.unwrap_or(fetched_at))
                .with_title(entry.title)
                .with_link(entry.link)
        })
        .collect()
}
