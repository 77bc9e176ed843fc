pub mod traits;
pub mod rss;

pub use traits::{FeedEntry, FeedSource};
pub use rss::HttpFeedSource;
