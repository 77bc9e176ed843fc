use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;

use crate::domain::FeedDescriptor;
use crate::errors::{DigestError, DigestResult};
use crate::sources::traits::{FeedEntry, FeedSource};

const USER_AGENT: &str = concat!("newsdigest/", env!("CARGO_PKG_VERSION"));

/// RSS/Atom/JSON feeds over HTTP
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> DigestResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { client })
    }

    fn parse_bytes(bytes: &[u8]) -> DigestResult<feed_rs::model::Feed> {
        parser::parse(bytes).map_err(|e| DigestError::FeedParse(e.to_string()))
    }

    /// Parse raw feed bytes into entries, keeping feed order
    pub fn entries_from_bytes(bytes: &[u8]) -> DigestResult<Vec<FeedEntry>> {
        let parsed = Self::parse_bytes(bytes)?;

        let entries = parsed
            .entries
            .into_iter()
            .map(|entry| FeedEntry {
                title: entry.title.map(|t| t.content),
                link: entry.links.into_iter().next().map(|l| l.href),
                published: entry.published.or(entry.updated),
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_entries(&self, feed: &FeedDescriptor) -> DigestResult<Vec<FeedEntry>> {
        let url = feed.parsed_url()?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        Self::entries_from_bytes(&bytes)
    }
}
