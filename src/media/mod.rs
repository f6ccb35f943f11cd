/// Media storage
///
/// Handles short-form video blobs. Uploads are content-addressed by
/// SHA-256 and stored behind a backend trait so tests and future remote
/// storage can swap the implementation.

pub mod disk;
pub mod store;

pub use disk::DiskMediaBackend;
pub use store::MediaStore;

use crate::error::CoreResult;
use async_trait::async_trait;

/// Media storage backend trait
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Store a blob under its content key
    async fn put(&self, key: &str, data: Vec<u8>) -> CoreResult<()>;

    /// Retrieve a blob by content key
    async fn get(&self, key: &str) -> CoreResult<Option<Vec<u8>>>;

    /// Delete a blob by content key
    async fn delete(&self, key: &str) -> CoreResult<()>;

    /// Check if a blob exists
    async fn exists(&self, key: &str) -> CoreResult<bool>;

    /// Get the size of a blob in bytes
    async fn size(&self, key: &str) -> CoreResult<Option<u64>>;
}
