use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum DigestError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Timeout: {feed} took longer than {timeout_ms}ms")]
    FeedTimeout { feed: String, timeout_ms: u64 },

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Aggregation errors
    #[error("All feeds failed or timed out. Aborting cache write.")]
    AllSourcesFailed,

    // Storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Cached digest is malformed: {0}")]
    MalformedCache(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DigestResult<T> = Result<T, DigestError>;
