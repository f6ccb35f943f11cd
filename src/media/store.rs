/// Media store
///
/// Validates short-form uploads against the configured limits and hands the
/// bytes to the storage backend under a content-addressed key.
use crate::{
    config::UploadConfig,
    error::{CoreError, CoreResult},
    media::{disk::DiskMediaBackend, MediaBackend},
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Scheme prefix of media refs produced by this store
const MEDIA_REF_PREFIX: &str = "boom://media/";

/// An uploaded media file as received from the presentation layer
#[derive(Debug, Clone)]
pub struct MediaBlob {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Main media store
#[derive(Clone)]
pub struct MediaStore {
    config: UploadConfig,
    backend: Arc<dyn MediaBackend>,
}

impl MediaStore {
    /// Create a media store over the configured disk backend
    pub fn new(config: UploadConfig) -> Self {
        let backend = Arc::new(DiskMediaBackend::new(config.media_directory.clone()));
        Self { config, backend }
    }

    /// Create a media store over an explicit backend
    pub fn with_backend(config: UploadConfig, backend: Arc<dyn MediaBackend>) -> Self {
        Self { config, backend }
    }

    /// Store an uploaded blob and return its media ref
    ///
    /// Identical content stores once and yields the same ref.
    pub async fn store(&self, blob: &MediaBlob) -> CoreResult<String> {
        self.validate_extension(&blob.file_name)?;

        if blob.data.len() > self.config.max_media_size {
            return Err(CoreError::InvalidUpload(format!(
                "Media exceeds maximum size of {} bytes",
                self.config.max_media_size
            )));
        }

        if blob.data.is_empty() {
            return Err(CoreError::InvalidUpload("Media file is empty".to_string()));
        }

        let key = Self::content_key(&blob.data);

        if !self.backend.exists(&key).await? {
            self.backend.put(&key, blob.data.clone()).await?;
            tracing::info!(%key, size = blob.data.len(), "stored media blob");
        }

        Ok(format!("{}{}", MEDIA_REF_PREFIX, key))
    }

    /// Fetch stored media bytes by ref
    pub async fn fetch(&self, media_ref: &str) -> CoreResult<Option<Vec<u8>>> {
        match media_ref.strip_prefix(MEDIA_REF_PREFIX) {
            Some(key) => self.backend.get(key).await,
            None => Ok(None),
        }
    }

    /// Content key for media bytes, SHA-256 hex
    fn content_key(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }

    /// Validate the file extension against the allowed list
    fn validate_extension(&self, file_name: &str) -> CoreResult<()> {
        let extension = file_name
            .rfind('.')
            .map(|i| file_name[i..].to_lowercase())
            .ok_or_else(|| {
                CoreError::InvalidUpload("Media file has no extension".to_string())
            })?;

        if self
            .config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            Ok(())
        } else {
            Err(CoreError::InvalidUpload(format!(
                "Unsupported media format: {}",
                extension
            )))
        }
    }
}
