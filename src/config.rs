/// Configuration management for the Boom service core
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub catalog: CatalogConfig,
    pub upload: UploadConfig,
    pub wallet: WalletConfig,
    pub session: SessionConfig,
    pub notifications: NotificationConfig,
    pub latency: LatencyConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base API endpoint; unused by the mock services but kept for the
    /// presentation layer's request builder
    pub api_url: String,
    pub version: String,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fixed feed page size
    pub page_size: usize,
    /// Seed the catalog with demo records at startup
    pub seed_demo_data: bool,
}

/// Upload limits for short-form media
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum short-form media size in bytes
    pub max_media_size: usize,
    /// Allowed media file extensions (with leading dot)
    pub allowed_extensions: Vec<String>,
    /// Directory for stored media blobs
    pub media_directory: PathBuf,
}

/// Wallet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Opening balance for the session wallet
    pub initial_balance: u64,
    /// Gift denominations offered by the presentation layer
    pub gift_amounts: Vec<u64>,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed namespace key for the persisted identity
    pub storage_namespace: String,
    /// Directory holding the persisted identity file
    pub storage_directory: PathBuf,
}

/// Notification channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long an entry stays visible before auto-expiry, in milliseconds
    pub display_timeout_ms: u64,
}

/// Simulated network latency per operation class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Disable to make all mocked operations resolve immediately (tests)
    pub enabled: bool,
    pub read_ms: u64,
    pub write_ms: u64,
    pub upload_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read_ms: 300,
            write_ms: 500,
            upload_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> CoreResult<Self> {
        dotenv::dotenv().ok();

        let api_url = env::var("BOOM_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
        let version = env::var("BOOM_VERSION").unwrap_or_else(|_| "0.1.0".to_string());

        let page_size = env::var("BOOM_FEED_PAGE_SIZE")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| CoreError::Validation("Invalid feed page size".to_string()))?;
        let seed_demo_data = env::var("BOOM_SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let max_media_size = env::var("BOOM_MAX_MEDIA_SIZE")
            .unwrap_or_else(|_| "10485760".to_string())
            .parse()
            .unwrap_or(10 * 1024 * 1024);
        let allowed_extensions = env::var("BOOM_ALLOWED_MEDIA_EXTENSIONS")
            .unwrap_or_else(|_| ".mp4,.webm,.ogg".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<String>>();

        let data_directory: PathBuf = env::var("BOOM_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let media_directory = env::var("BOOM_MEDIA_DIRECTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("media"));
        let storage_directory = env::var("BOOM_SESSION_DIRECTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("session"));
        let storage_namespace =
            env::var("BOOM_SESSION_NAMESPACE").unwrap_or_else(|_| "boom_user".to_string());

        let initial_balance = env::var("BOOM_WALLET_INITIAL_BALANCE")
            .unwrap_or_else(|_| "500".to_string())
            .parse()
            .unwrap_or(500);
        let gift_amounts = env::var("BOOM_GIFT_AMOUNTS")
            .unwrap_or_else(|_| "10,50,100,200,500".to_string())
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect::<Vec<u64>>();

        let display_timeout_ms = env::var("BOOM_NOTIFICATION_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let latency_enabled = env::var("BOOM_LATENCY_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);
        let latency_read_ms = env::var("BOOM_LATENCY_READ_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);
        let latency_write_ms = env::var("BOOM_LATENCY_WRITE_MS")
            .unwrap_or_else(|_| "500".to_string())
            .parse()
            .unwrap_or(500);
        let latency_upload_ms = env::var("BOOM_LATENCY_UPLOAD_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(AppConfig {
            service: ServiceConfig { api_url, version },
            catalog: CatalogConfig {
                page_size,
                seed_demo_data,
            },
            upload: UploadConfig {
                max_media_size,
                allowed_extensions,
                media_directory,
            },
            wallet: WalletConfig {
                initial_balance,
                gift_amounts,
            },
            session: SessionConfig {
                storage_namespace,
                storage_directory,
            },
            notifications: NotificationConfig { display_timeout_ms },
            latency: LatencyConfig {
                enabled: latency_enabled,
                read_ms: latency_read_ms,
                write_ms: latency_write_ms,
                upload_ms: latency_upload_ms,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.catalog.page_size == 0 {
            return Err(CoreError::Validation(
                "Feed page size must be at least 1".to_string(),
            ));
        }

        if self.upload.max_media_size == 0 {
            return Err(CoreError::Validation(
                "Max media size must be non-zero".to_string(),
            ));
        }

        if self.upload.allowed_extensions.is_empty() {
            return Err(CoreError::Validation(
                "At least one media extension must be allowed".to_string(),
            ));
        }

        if self.session.storage_namespace.is_empty() {
            return Err(CoreError::Validation(
                "Session storage namespace cannot be empty".to_string(),
            ));
        }

        if self.wallet.gift_amounts.is_empty() {
            return Err(CoreError::Validation(
                "At least one gift denomination is required".to_string(),
            ));
        }

        Ok(())
    }
}
