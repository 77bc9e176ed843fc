use async_trait::async_trait;
use thiserror::Error;

/// Error code object stores use for a missing key
pub const NOT_FOUND_CODE: &str = "NoSuchKey";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("The specified key does not exist: {key}")]
    NotFound { key: String },

    #[error("{message}")]
    Service {
        code: Option<String>,
        status: Option<u16>,
        message: String,
    },

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn not_found(key: &str) -> Self {
        StorageError::NotFound {
            key: key.to_string(),
        }
    }

    pub fn service(code: Option<&str>, status: Option<u16>, message: &str) -> Self {
        StorageError::Service {
            code: code.map(str::to_string),
            status,
            message: message.to_string(),
        }
    }

    /// True when the key is missing, by variant, error code, or HTTP 404
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::NotFound { .. } => true,
            StorageError::Service { code, status, .. } => {
                code.as_deref() == Some(NOT_FOUND_CODE) || *status == Some(404)
            }
            StorageError::Io(_) => false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full object body stored under `key`
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Store `body` under `key`, replacing any existing object
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
}
