/// Synthetic network delay for mocked operations
///
/// The stores simulate a remote backend by sleeping before touching state.
/// Three delay classes mirror the cost of the calls being mocked: cheap
/// reads, state-changing writes, and media uploads.
use crate::config::LatencyConfig;
use std::time::Duration;

/// Simulated latency applied by the mock stores
#[derive(Debug, Clone)]
pub struct Latency {
    config: LatencyConfig,
}

impl Latency {
    /// Create from configuration
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    /// Latency disabled entirely; operations resolve immediately
    pub fn disabled() -> Self {
        Self {
            config: LatencyConfig {
                enabled: false,
                ..LatencyConfig::default()
            },
        }
    }

    /// Delay for snapshot reads (balance, history, fetches)
    pub async fn read(&self) {
        self.sleep(self.config.read_ms).await;
    }

    /// Delay for state-changing operations (login, gift, comment, purchase)
    pub async fn write(&self) {
        self.sleep(self.config.write_ms).await;
    }

    /// Delay for media uploads
    pub async fn upload(&self) {
        self.sleep(self.config.upload_ms).await;
    }

    async fn sleep(&self, ms: u64) {
        if self.config.enabled && ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}
