use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::errors::{DigestError, DigestResult};
use crate::services::FEED_TIMEOUT_MS;

/// Bucket holding the daily digests
pub const BUCKET_NAME: &str = "andres-morales-portfolio";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Where digests are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    S3,
    Fs,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(StoreBackend::S3),
            "fs" | "file" => Ok(StoreBackend::Fs),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub bucket: String,
    pub backend: StoreBackend,
    /// S3-compatible endpoint overriding AWS
    pub s3_endpoint: Option<String>,
    pub store_root: PathBuf,
    pub feed_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> DigestResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let default_root = exe_dir
            .map(|d| d.join("object-store"))
            .unwrap_or_else(|| PathBuf::from("./object-store"));

        Self::from_lookup(|key| std::env::var(key).ok(), default_root)
    }

    /// Build from any key lookup; `default_root` applies when
    /// `DIGEST_STORE_ROOT` is unset
    pub fn from_lookup<F>(lookup: F, default_root: PathBuf) -> DigestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup("AWS_REGION")
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let backend = match lookup("DIGEST_STORE_BACKEND") {
            Some(raw) => raw.parse().map_err(DigestError::Config)?,
            None => StoreBackend::S3,
        };

        let s3_endpoint = lookup("DIGEST_S3_ENDPOINT").filter(|e| !e.trim().is_empty());

        let store_root = lookup("DIGEST_STORE_ROOT")
            .map(PathBuf::from)
            .unwrap_or(default_root);

        let feed_timeout = match lookup("DIGEST_FEED_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_timeout_ms(&raw)?),
            None => Duration::from_millis(FEED_TIMEOUT_MS),
        };

        let log_level = match lookup("DIGEST_LOG_LEVEL") {
            Some(raw) => parse_log_level(&raw)?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            region,
            bucket: BUCKET_NAME.to_string(),
            backend,
            s3_endpoint,
            store_root,
            feed_timeout,
            log_level,
        })
    }
}

fn parse_timeout_ms(raw: &str) -> DigestResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(DigestError::Config(format!(
            "DIGEST_FEED_TIMEOUT_MS must be a positive number of milliseconds, got '{}'",
            raw
        ))),
    }
}

fn parse_log_level(raw: &str) -> DigestResult<Level> {
    raw.trim().parse::<Level>().map_err(|_| {
        DigestError::Config(format!(
            "DIGEST_LOG_LEVEL must be one of trace, debug, info, warn, error, got '{}'",
            raw
        ))
    })
}
