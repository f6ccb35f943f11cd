/// Notification channel
///
/// Ephemeral queue of user-facing messages. The presentation layer pushes an
/// entry for every intent outcome; entries expire automatically after the
/// display timeout or when dismissed. Carries no business logic.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Severity of a notification entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A single queued notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Fire-and-forget notification queue with auto-expiry
#[derive(Clone)]
pub struct NotificationChannel {
    entries: Arc<RwLock<Vec<NotificationEntry>>>,
    display_timeout: Duration,
}

impl NotificationChannel {
    /// Create a channel whose entries expire after `display_timeout`
    pub fn new(display_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            display_timeout,
        }
    }

    /// Queue a message; returns the entry id
    ///
    /// Entries stack most recent last. Expiry runs on a detached task, so the
    /// caller never waits on the timeout.
    pub async fn push(&self, message: impl Into<String>, severity: Severity) -> String {
        let entry = NotificationEntry {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = entry.id.clone();

        {
            let mut entries = self.entries.write().await;
            entries.push(entry);
        }

        let entries = Arc::clone(&self.entries);
        let timeout = self.display_timeout;
        let expired_id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut entries = entries.write().await;
            entries.retain(|e| e.id != expired_id);
        });

        tracing::debug!(%id, ?severity, "queued notification");

        id
    }

    /// Dismiss an entry before its timeout; returns whether it was present
    pub async fn dismiss(&self, id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Snapshot of the currently visible entries, oldest first
    pub async fn active(&self) -> Vec<NotificationEntry> {
        self.entries.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_channel(timeout_ms: u64) -> NotificationChannel {
        NotificationChannel::new(Duration::from_millis(timeout_ms))
    }

    #[tokio::test]
    async fn test_push_and_snapshot() {
        let channel = test_channel(10_000);

        channel.push("Video uploaded successfully!", Severity::Success).await;
        channel.push("Failed to load videos", Severity::Error).await;

        let active = channel.active().await;
        assert_eq!(active.len(), 2);
        // Stacked most recent last
        assert_eq!(active[0].message, "Video uploaded successfully!");
        assert_eq!(active[1].severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_dismiss() {
        let channel = test_channel(10_000);

        let id = channel.push("Insufficient balance", Severity::Warning).await;
        assert!(channel.dismiss(&id).await);
        assert!(channel.active().await.is_empty());

        // Second dismissal is a no-op
        assert!(!channel.dismiss(&id).await);
    }

    #[tokio::test]
    async fn test_auto_expiry() {
        let channel = test_channel(20);

        channel.push("transient", Severity::Info).await;
        assert_eq!(channel.active().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(channel.active().await.is_empty());
    }
}
