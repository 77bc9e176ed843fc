use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{sort_newest_first, Digest, FeedDescriptor};
use crate::errors::{DigestError, DigestResult};
use crate::services::FetchService;

/// Fans out one fetch per feed and merges the results
pub struct AggregateService {
    fetcher: Arc<FetchService>,
}

impl AggregateService {
    pub fn new(fetcher: Arc<FetchService>) -> Self {
        Self { fetcher }
    }

    /// Fetch every feed concurrently and merge newest first.
    ///
    /// Waits for all fetches to settle. A fetch task that dies contributes
    /// nothing. Returns [`DigestError::AllSourcesFailed`] when the merged
    /// digest would be empty.
    pub async fn aggregate(&self, feeds: &[FeedDescriptor]) -> DigestResult<Digest> {
        let handles = feeds.iter().cloned().map(|feed| {
            let fetcher = Arc::clone(&self.fetcher);
            tokio::spawn(async move { fetcher.fetch(&feed).await })
        });

        let settled = join_all(handles).await;

        let mut news = Vec::new();
        for (feed, outcome) in feeds.iter().zip(settled) {
            match outcome {
                Ok(items) => news.extend(items),
                Err(e) => warn!(feed = %feed.name, error = %e, "Feed task did not complete"),
            }
        }

        if news.is_empty() {
            return Err(DigestError::AllSourcesFailed);
        }

        sort_newest_first(&mut news);
        info!(feeds = feeds.len(), items = news.len(), "Feeds aggregated");

        Ok(news)
    }
}
