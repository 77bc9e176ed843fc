use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::storage::traits::{ObjectStore, StorageError};

/// Object store backed by a local directory
///
/// Objects live at `{root}/{region}/{bucket}/{key}`. Keys may contain `/`,
/// which maps onto nested directories the same way object store prefixes do.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    bucket_dir: PathBuf,
}

impl FsObjectStore {
    pub fn new<P: AsRef<Path>>(root: P, region: &str, bucket: &str) -> Self {
        Self {
            bucket_dir: root.as_ref().join(region).join(bucket),
        }
    }

    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !valid {
            return Err(StorageError::service(
                Some("InvalidKey"),
                Some(400),
                &format!("Invalid object key: {}", key),
            ));
        }

        Ok(self.bucket_dir.join(relative))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(key)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let path = self.object_path(key)?;
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.bucket_dir.clone());
        tokio::fs::create_dir_all(&parent).await?;

        let size = body.len();
        // Each writer gets its own temp file; the rename makes the last complete write win
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
            tmp.write_all(&body)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        debug!(key = %key, bytes = size, content_type = %content_type, "Object stored");
        Ok(())
    }
}
