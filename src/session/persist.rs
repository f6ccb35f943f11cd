/// Session persistence collaborator
///
/// Replaces the browser's localStorage: one fixed namespace holding the
/// serialized active identity. Backends implement the trait; the disk
/// backend writes a single JSON file, the in-memory backend exists for
/// tests and embedding without a filesystem.
use crate::{
    error::{CoreError, CoreResult},
    session::models::Identity,
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

/// Storage backend for the persisted session identity
#[async_trait]
pub trait SessionPersist: Send + Sync {
    /// Persist the identity under the fixed namespace
    async fn save(&self, identity: &Identity) -> CoreResult<()>;

    /// Load the persisted identity, if any
    async fn load(&self) -> CoreResult<Option<Identity>>;

    /// Remove the persisted identity; a no-op when nothing is stored
    async fn clear(&self) -> CoreResult<()>;
}

/// Disk-backed persistence
///
/// Stores the identity as `{directory}/{namespace}.json`.
#[derive(Clone)]
pub struct DiskSessionPersist {
    directory: PathBuf,
    namespace: String,
}

impl DiskSessionPersist {
    /// Create a new disk persistence backend
    pub fn new(directory: PathBuf, namespace: String) -> Self {
        Self {
            directory,
            namespace,
        }
    }

    fn storage_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.namespace))
    }
}

#[async_trait]
impl SessionPersist for DiskSessionPersist {
    async fn save(&self, identity: &Identity) -> CoreResult<()> {
        fs::create_dir_all(&self.directory).await.map_err(|e| {
            CoreError::Persistence(format!("Failed to create session directory: {}", e))
        })?;

        let payload = serde_json::to_vec(identity)
            .map_err(|e| CoreError::Persistence(format!("Failed to serialize identity: {}", e)))?;

        fs::write(self.storage_path(), payload)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to write identity: {}", e)))?;

        Ok(())
    }

    async fn load(&self) -> CoreResult<Option<Identity>> {
        let data = match fs::read(self.storage_path()).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::Persistence(format!(
                    "Failed to read identity: {}",
                    e
                )))
            }
        };

        match serde_json::from_slice::<Identity>(&data) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                // A corrupt entry behaves like a signed-out session
                tracing::warn!("Failed to parse stored identity: {}", e);
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> CoreResult<()> {
        match fs::remove_file(self.storage_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Persistence(format!(
                "Failed to clear identity: {}",
                e
            ))),
        }
    }
}

/// In-memory persistence for tests
#[derive(Default)]
pub struct MemorySessionPersist {
    slot: RwLock<Option<Identity>>,
}

impl MemorySessionPersist {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionPersist for MemorySessionPersist {
    async fn save(&self, identity: &Identity) -> CoreResult<()> {
        let mut slot = self.slot.write().await;
        *slot = Some(identity.clone());
        Ok(())
    }

    async fn load(&self) -> CoreResult<Option<Identity>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut slot = self.slot.write().await;
        *slot = None;
        Ok(())
    }
}
