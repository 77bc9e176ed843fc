use chrono::{DateTime, NaiveDate, Utc};

pub const CACHE_PREFIX: &str = "news-cache";

/// Storage key for the digest of one UTC calendar day
pub fn cache_key_for_date(date: NaiveDate) -> String {
    format!("{}/{}.json", CACHE_PREFIX, date.format("%Y-%m-%d"))
}

pub fn cache_key_at(request_time: DateTime<Utc>) -> String {
    cache_key_for_date(request_time.date_naive())
}
