use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::domain::{Clock, FeedDescriptor, Response};
use crate::errors::DigestResult;
use crate::services::{AggregateService, CacheService, FetchService};
use crate::sources::{FeedSource, HttpFeedSource};
use crate::storage::{FsObjectStore, ObjectStore, S3ObjectStore};

/// Process-wide handles, built once and reused for every invocation
pub struct App {
    cache_service: CacheService,
}

impl App {
    /// Production wiring: HTTP feeds and the configured object store
    pub async fn from_config(config: &Config, clock: Arc<dyn Clock>) -> DigestResult<Self> {
        let store = object_store(config).await;
        Self::new(config, store, clock)
    }

    pub fn new(
        config: &Config,
        store: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
    ) -> DigestResult<Self> {
        let source = HttpFeedSource::new()?;
        Ok(Self::with_source(
            config,
            store,
            Arc::new(source),
            clock,
            FeedDescriptor::defaults(),
        ))
    }

    pub fn with_source(
        config: &Config,
        store: Arc<dyn ObjectStore>,
        source: Arc<dyn FeedSource>,
        clock: Arc<dyn Clock>,
        feeds: Vec<FeedDescriptor>,
    ) -> Self {
        let fetcher = FetchService::new(source, Arc::clone(&clock)).with_timeout(config.feed_timeout);
        let aggregator = AggregateService::new(Arc::new(fetcher));

        Self {
            cache_service: CacheService::new(store, aggregator, feeds, clock),
        }
    }

    /// Serve one request. Takes no input; "today" comes from the clock.
    pub async fn invoke(&self) -> Response {
        self.cache_service.handle().await
    }
}

/// Build the store selected by `config.backend`
pub async fn object_store(config: &Config) -> Arc<dyn ObjectStore> {
    match config.backend {
        StoreBackend::S3 => {
            let store =
                S3ObjectStore::connect(&config.region, &config.bucket, config.s3_endpoint.as_deref()).await;
            info!(
                region = %config.region,
                bucket = %store.bucket(),
                endpoint = config.s3_endpoint.as_deref().unwrap_or("aws"),
                "S3 object store ready"
            );
            Arc::new(store)
        }
        StoreBackend::Fs => {
            let store = FsObjectStore::new(&config.store_root, &config.region, &config.bucket);
            info!(
                region = %config.region,
                bucket = %config.bucket,
                location = %store.bucket_dir().display(),
                "Filesystem object store ready"
            );
            Arc::new(store)
        }
    }
}
