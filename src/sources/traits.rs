use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::FeedDescriptor;
use crate::errors::DigestResult;

/// An entry as the upstream feed provided it, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve and parse a feed, returning entries in feed order
    async fn fetch_entries(&self, feed: &FeedDescriptor) -> DigestResult<Vec<FeedEntry>>;
}
