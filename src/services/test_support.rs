use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::FeedDescriptor;
use crate::errors::{DigestError, DigestResult};
use crate::sources::{FeedEntry, FeedSource};

pub fn entry(title: Option<&str>, y: i32, m: u32, d: u32) -> FeedEntry {
    FeedEntry {
        title: title.map(str::to_string),
        link: title.map(|t| format!("https://example.com/{}", t.replace(' ', "-"))),
        published: Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
    }
}

enum Script {
    Entries(Vec<FeedEntry>),
    Delayed(Duration, Vec<FeedEntry>),
    Fail(String),
    Panic,
}

/// Feed source answering per feed name from a fixed script
#[derive(Default)]
pub struct ScriptedSource {
    scripts: HashMap<String, Script>,
    calls: Arc<AtomicU64>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(mut self, feed: &str, entries: Vec<FeedEntry>) -> Self {
        self.scripts.insert(feed.to_string(), Script::Entries(entries));
        self
    }

    pub fn delayed(mut self, feed: &str, delay: Duration, entries: Vec<FeedEntry>) -> Self {
        self.scripts
            .insert(feed.to_string(), Script::Delayed(delay, entries));
        self
    }

    pub fn failing(mut self, feed: &str, message: &str) -> Self {
        self.scripts
            .insert(feed.to_string(), Script::Fail(message.to_string()));
        self
    }

    pub fn panicking(mut self, feed: &str) -> Self {
        self.scripts.insert(feed.to_string(), Script::Panic);
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    async fn fetch_entries(&self, feed: &FeedDescriptor) -> DigestResult<Vec<FeedEntry>> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match self.scripts.get(&feed.name) {
            Some(Script::Entries(entries)) => Ok(entries.clone()),
            Some(Script::Delayed(delay, entries)) => {
                tokio::time::sleep(*delay).await;
                Ok(entries.clone())
            }
            Some(Script::Fail(message)) => Err(DigestError::FeedParse(message.clone())),
            Some(Script::Panic) => panic!("scripted panic for {}", feed.name),
            None => Err(DigestError::FeedParse(format!("no script for {}", feed.name))),
        }
    }
}
