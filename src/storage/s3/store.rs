use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::storage::traits::{ObjectStore, StorageError, NOT_FOUND_CODE};

/// Object store backed by an S3 bucket
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS configuration, pinned to `region`.
    /// `endpoint` points the client at an S3-compatible service instead of AWS.
    pub async fn connect(region: &str, bucket: &str, endpoint: Option<&str>) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::with_client(Client::from_conf(builder.build()), bucket)
    }

    pub fn with_client(client: Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Carry the service error code and HTTP status through so callers can
/// tell a missing key from every other failure
fn storage_error<E>(err: SdkError<E, HttpResponse>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    StorageError::Service {
        code,
        status,
        message,
    }
}

fn get_error(err: SdkError<GetObjectError, HttpResponse>) -> StorageError {
    let missing = err
        .as_service_error()
        .is_some_and(GetObjectError::is_no_such_key);

    match storage_error(err) {
        StorageError::Service {
            status, message, ..
        } if missing => StorageError::Service {
            code: Some(NOT_FOUND_CODE.to_string()),
            status,
            message,
        },
        other => other,
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(get_error)?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::service(None, None, &e.to_string()))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(storage_error)?;

        debug!(bucket = %self.bucket, key = %key, bytes = size, "Object stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::retry::RetryConfig;
    use aws_sdk_s3::config::Credentials;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BUCKET: &str = "andres-morales-portfolio";

    /// Canned S3 answer for every GET
    struct Canned {
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    }

    /// Serve `canned` to every connection on a local port, returning the endpoint
    async fn fake_s3(canned: Canned) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    canned.status,
                    canned.content_type,
                    canned.body.len(),
                    canned.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn store_at(endpoint: &str) -> S3ObjectStore {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .endpoint_url(endpoint)
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .build();

        S3ObjectStore::with_client(Client::from_conf(config), BUCKET)
    }

    #[tokio::test]
    async fn test_no_such_key_is_a_miss() {
        let endpoint = fake_s3(Canned {
            status: "404 Not Found",
            content_type: "application/xml",
            body: r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Key>news-cache/2024-01-01.json</Key></Error>"#,
        })
        .await;

        let err = store_at(&endpoint)
            .get("news-cache/2024-01-01.json")
            .await
            .unwrap_err();

        assert!(err.is_not_found(), "expected a miss, got {:?}", err);
        match err {
            StorageError::Service { code, status, .. } => {
                assert_eq!(code.as_deref(), Some("NoSuchKey"));
                assert_eq!(status, Some(404));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_access_denied_is_not_a_miss() {
        let endpoint = fake_s3(Canned {
            status: "403 Forbidden",
            content_type: "application/xml",
            body: r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>"#,
        })
        .await;

        let err = store_at(&endpoint)
            .get("news-cache/2024-01-01.json")
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Access Denied");
        match err {
            StorageError::Service { code, status, .. } => {
                assert_eq!(code.as_deref(), Some("AccessDenied"));
                assert_eq!(status, Some(403));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_returns_object_body() {
        let endpoint = fake_s3(Canned {
            status: "200 OK",
            content_type: "application/json",
            body: r#"[{"source":"InfoQ","date":1704067200000}]"#,
        })
        .await;

        let body = store_at(&endpoint)
            .get("news-cache/2024-01-01.json")
            .await
            .unwrap();

        assert_eq!(body, br#"[{"source":"InfoQ","date":1704067200000}]"#);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_not_a_miss() {
        // Bind then drop so the port refuses connections
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = store_at(&endpoint)
            .get("news-cache/2024-01-01.json")
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_bucket_name() {
        let store = store_at("http://127.0.0.1:1");
        assert_eq!(store.bucket(), BUCKET);
    }
}
