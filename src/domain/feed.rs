use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{DigestError, DigestResult};

/// Upstream feeds polled for every digest, in display order
pub const FEEDS: &[(&str, &str)] = &[
    (
        "Cursor",
        "https://any-feeds.com/api/feeds/custom/cmkoaiogm0000lf04qmtirq2g/rss.xml",
    ),
    ("InfoQ", "https://feed.infoq.com/"),
    ("HackerNews", "https://news.ycombinator.com/rss"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The compiled-in feed list
    pub fn defaults() -> Vec<FeedDescriptor> {
        FEEDS
            .iter()
            .map(|(name, url)| FeedDescriptor::new(*name, *url))
            .collect()
    }

    pub fn parsed_url(&self) -> DigestResult<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| DigestError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DigestError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.url, other
            ))),
        }
    }
}
