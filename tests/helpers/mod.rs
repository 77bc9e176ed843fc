#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use newsdigest::domain::FeedDescriptor;
use newsdigest::errors::{DigestError, DigestResult};
use newsdigest::sources::{FeedEntry, FeedSource};

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn dated(title: &str, at: DateTime<Utc>) -> FeedEntry {
    FeedEntry {
        title: Some(title.to_string()),
        link: Some(format!("https://news.example.com/{}", title)),
        published: Some(at),
    }
}

pub fn feed(name: &str) -> FeedDescriptor {
    FeedDescriptor::new(name, format!("https://{}.example.com/rss", name.to_lowercase()))
}

#[derive(Clone)]
enum Behavior {
    Respond(Duration, Vec<FeedEntry>),
    Fail,
}

/// Stub upstream that answers by feed name and counts calls
#[derive(Clone, Default)]
pub struct StubSource {
    behaviors: HashMap<String, Behavior>,
    calls: Arc<AtomicU64>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, feed: &str, entries: Vec<FeedEntry>) -> Self {
        self.behaviors
            .insert(feed.to_string(), Behavior::Respond(Duration::ZERO, entries));
        self
    }

    pub fn respond_after(mut self, feed: &str, delay: Duration, entries: Vec<FeedEntry>) -> Self {
        self.behaviors
            .insert(feed.to_string(), Behavior::Respond(delay, entries));
        self
    }

    pub fn fail(mut self, feed: &str) -> Self {
        self.behaviors.insert(feed.to_string(), Behavior::Fail);
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeedSource for StubSource {
    async fn fetch_entries(&self, feed: &FeedDescriptor) -> DigestResult<Vec<FeedEntry>> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match self.behaviors.get(&feed.name).cloned() {
            Some(Behavior::Respond(delay, entries)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(entries)
            }
            Some(Behavior::Fail) | None => Err(DigestError::FeedParse(format!(
                "{} returned an HTML error page",
                feed.name
            ))),
        }
    }
}
