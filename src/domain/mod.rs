pub mod feed;
pub mod news_item;
pub mod cache_key;
pub mod clock;
pub mod response;

pub use feed::{FeedDescriptor, FEEDS};
pub use news_item::{sort_newest_first, Digest, NewsItem};
pub use cache_key::{cache_key_at, cache_key_for_date, CACHE_PREFIX};
pub use clock::{Clock, FixedClock, SystemClock};
pub use response::{ErrorBody, Response, ResponseHeaders, STATUS_INTERNAL_ERROR, STATUS_OK};
