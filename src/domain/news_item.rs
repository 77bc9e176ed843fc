use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One headline in a digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Publish time in epoch milliseconds
    pub date: i64,
}

impl NewsItem {
    pub fn new(source: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            source: source.into(),
            title: None,
            link: None,
            date: date.timestamp_millis(),
        }
    }

    /// Empty strings are treated as absent
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.is_empty());
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link.filter(|l| !l.is_empty());
        self
    }
}

/// Items merged across feeds, newest first
pub type Digest = Vec<NewsItem>;

/// Sort newest first. Stable, so equal dates keep their input order.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}
