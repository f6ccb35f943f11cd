/// Application context and dependency injection
use crate::{
    catalog::{models::VideoRecord, CatalogStore},
    config::AppConfig,
    error::{CoreError, CoreResult},
    latency::Latency,
    media::MediaStore,
    notify::NotificationChannel,
    session::{DiskSessionPersist, SessionPersist, SessionStore},
    wallet::WalletStore,
};
use std::sync::Arc;
use std::time::Duration;

/// Application context holding all shared stores
///
/// Constructed once per process; every store is an explicit instance owned
/// here, torn down when the context drops.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
    pub wallet: Arc<WalletStore>,
    pub catalog: Arc<CatalogStore>,
    pub media: Arc<MediaStore>,
    pub notifications: NotificationChannel,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: AppConfig) -> CoreResult<Self> {
        // Validate configuration
        config.validate()?;

        // Create data directories if they don't exist
        Self::ensure_directories(&config).await?;

        let latency = Latency::new(config.latency.clone());

        // Session identity persists across restarts via the disk collaborator
        let persist: Arc<dyn SessionPersist> = Arc::new(DiskSessionPersist::new(
            config.session.storage_directory.clone(),
            config.session.storage_namespace.clone(),
        ));
        let session = Arc::new(SessionStore::new(persist, latency.clone()).await?);

        let media = Arc::new(MediaStore::new(config.upload.clone()));

        let wallet = Arc::new(WalletStore::new(
            config.wallet.initial_balance,
            Arc::clone(&session),
            latency.clone(),
        ));

        let catalog = Arc::new(CatalogStore::new(
            Arc::clone(&session),
            Arc::clone(&media),
            config.catalog.page_size,
            latency,
        ));
        if config.catalog.seed_demo_data {
            catalog.seed_demo_library().await;
        }

        let notifications = NotificationChannel::new(Duration::from_millis(
            config.notifications.display_timeout_ms,
        ));

        Ok(Self {
            config: Arc::new(config),
            session,
            wallet,
            catalog,
            media,
            notifications,
        })
    }

    /// Ensure required directories exist
    async fn ensure_directories(config: &AppConfig) -> CoreResult<()> {
        let dirs = vec![
            &config.upload.media_directory,
            &config.session.storage_directory,
        ];

        for dir in dirs {
            if !dir.exists() {
                tokio::fs::create_dir_all(dir).await.map_err(|e| {
                    CoreError::Internal(format!("Failed to create directory {:?}: {}", dir, e))
                })?;
            }
        }

        Ok(())
    }

    /// Purchase a video for the current viewer
    ///
    /// The one coordinating operation spanning wallet and catalog: the
    /// deduction and the purchase flag either both apply or neither does,
    /// and repeat purchases of the same video never deduct twice.
    pub async fn purchase_video(&self, video_id: &str) -> CoreResult<VideoRecord> {
        self.session.require_current().await?;

        let video = self.catalog.fetch_one(video_id).await?;

        // Already unlocked for this viewer: nothing to charge
        if video.purchased {
            return Ok(video);
        }

        // Free videos are always viewable; flag them without touching the wallet
        if video.price == 0 {
            return self.catalog.record_purchase(video_id).await;
        }

        let transaction = self
            .wallet
            .deduct_for_purchase(video_id, &video.title, video.price)
            .await?;

        match self.catalog.record_purchase(video_id).await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.wallet.rollback_purchase(&transaction.id).await;
                Err(e)
            }
        }
    }
}
