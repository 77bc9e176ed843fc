use serde::{Deserialize, Serialize};

use super::Digest;

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json".to_string(),
            allow_origin: "*".to_string(),
        }
    }
}

/// Uniform envelope returned for every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: ResponseHeaders,
    /// JSON-encoded payload
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl Response {
    pub fn new<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            serde_json::json!({ "error": e.to_string() }).to_string()
        });

        Self {
            status_code,
            headers: ResponseHeaders::default(),
            body,
        }
    }

    pub fn ok(digest: &Digest) -> Self {
        Self::new(STATUS_OK, digest)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            STATUS_INTERNAL_ERROR,
            &ErrorBody {
                error: message.into(),
            },
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
