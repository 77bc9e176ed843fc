use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{cache_key_at, Clock, Digest, FeedDescriptor, Response};
use crate::errors::{DigestError, DigestResult};
use crate::services::AggregateService;
use crate::storage::ObjectStore;

pub const DIGEST_CONTENT_TYPE: &str = "application/json";

/// Serves the day's digest from storage, filling the cache on a miss
pub struct CacheService {
    store: Arc<dyn ObjectStore>,
    aggregator: AggregateService,
    feeds: Vec<FeedDescriptor>,
    clock: Arc<dyn Clock>,
}

impl CacheService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        aggregator: AggregateService,
        feeds: Vec<FeedDescriptor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            aggregator,
            feeds,
            clock,
        }
    }

    /// Handle a request dated by the service clock
    pub async fn handle(&self) -> Response {
        self.handle_at(self.clock.now()).await
    }

    pub async fn handle_at(&self, request_time: DateTime<Utc>) -> Response {
        match self.digest_at(request_time).await {
            Ok(digest) => Response::ok(&digest),
            Err(e) => {
                error!(error = %e, "Digest request failed");
                Response::error(e.to_string())
            }
        }
    }

    /// Read the digest for the UTC day of `request_time`, aggregating and
    /// storing it when the day has no entry yet.
    ///
    /// Only a missing key triggers aggregation. Any other read failure,
    /// including a cached payload that does not decode, is returned as is.
    pub async fn digest_at(&self, request_time: DateTime<Utc>) -> DigestResult<Digest> {
        let key = cache_key_at(request_time);

        match self.store.get(&key).await {
            Ok(body) => {
                let digest: Digest = serde_json::from_slice(&body)
                    .map_err(|e| DigestError::MalformedCache(e.to_string()))?;
                info!(key = %key, items = digest.len(), "Cache hit: serving stored digest");
                Ok(digest)
            }
            Err(e) if e.is_not_found() => {
                info!(key = %key, "Cache miss: aggregating feeds");
                self.fill(&key).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fill(&self, key: &str) -> DigestResult<Digest> {
        let digest = self.aggregator.aggregate(&self.feeds).await?;
        let body = serde_json::to_vec(&digest)?;

        // The digest is still valid when the write fails; the next request retries the fill
        match self.store.put(key, body, DIGEST_CONTENT_TYPE).await {
            Ok(()) => info!(key = %key, items = digest.len(), "Digest stored"),
            Err(e) => warn!(key = %key, error = %e, "Failed to store digest"),
        }

        Ok(digest)
    }
}
