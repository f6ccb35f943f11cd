/// Disk-based media storage backend
use crate::{
    error::{CoreError, CoreResult},
    media::MediaBackend,
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Disk storage backend
///
/// Stores blobs on the local filesystem with directory sharding based on
/// key prefixes to prevent too many files in one directory.
#[derive(Clone)]
pub struct DiskMediaBackend {
    base_path: PathBuf,
}

impl DiskMediaBackend {
    /// Create a new disk storage backend
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the file path for a content key
    ///
    /// Uses directory sharding: {base}/{first2chars}/{key}
    fn media_path(&self, key: &str) -> PathBuf {
        if key.len() >= 2 {
            let shard = &key[0..2];
            self.base_path.join(shard).join(key)
        } else {
            self.base_path.join("_").join(key)
        }
    }

    /// Ensure the directory for a blob exists
    async fn ensure_media_dir(&self, key: &str) -> CoreResult<PathBuf> {
        let path = self.media_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::MediaStorage(format!("Failed to create media directory: {}", e))
            })?;
        }
        Ok(path)
    }
}

#[async_trait]
impl MediaBackend for DiskMediaBackend {
    async fn put(&self, key: &str, data: Vec<u8>) -> CoreResult<()> {
        let path = self.ensure_media_dir(key).await?;

        fs::write(&path, data)
            .await
            .map_err(|e| CoreError::MediaStorage(format!("Failed to write media {}: {}", key, e)))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> CoreResult<Option<Vec<u8>>> {
        let path = self.media_path(key);

        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::MediaStorage(format!(
                "Failed to read media {}: {}",
                key, e
            ))),
        }
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        let path = self.media_path(key);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::MediaStorage(format!(
                "Failed to delete media {}: {}",
                key, e
            ))),
        }
    }

    async fn exists(&self, key: &str) -> CoreResult<bool> {
        Ok(self.media_path(key).exists())
    }

    async fn size(&self, key: &str) -> CoreResult<Option<u64>> {
        match fs::metadata(self.media_path(key)).await {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::MediaStorage(format!(
                "Failed to get media size {}: {}",
                key, e
            ))),
        }
    }
}
