/// Wallet store
///
/// Balance checks and mutations happen under a single write lock, so a
/// spend is always decided against the authoritative balance rather than a
/// caller-held snapshot.
use crate::{
    error::{CoreError, CoreResult},
    latency::Latency,
    session::SessionStore,
    wallet::models::{TransactionKind, TransactionRecord},
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct WalletState {
    balance: u64,
    /// Append-only, oldest first
    transactions: Vec<TransactionRecord>,
}

/// Wallet store service
pub struct WalletStore {
    state: RwLock<WalletState>,
    session: Arc<SessionStore>,
    latency: Latency,
}

impl WalletStore {
    /// Create a wallet with the configured opening balance
    pub fn new(initial_balance: u64, session: Arc<SessionStore>, latency: Latency) -> Self {
        Self {
            state: RwLock::new(WalletState {
                balance: initial_balance,
                transactions: Vec::new(),
            }),
            session,
            latency,
        }
    }

    /// Current balance snapshot
    pub async fn balance(&self) -> u64 {
        self.latency.read().await;
        self.state.read().await.balance
    }

    /// Transaction history snapshot, oldest first
    pub async fn history(&self) -> Vec<TransactionRecord> {
        self.latency.read().await;
        self.state.read().await.transactions.clone()
    }

    /// Transfer `amount` to a creator as a gift
    pub async fn gift(
        &self,
        video_id: &str,
        creator_id: &str,
        amount: u64,
    ) -> CoreResult<TransactionRecord> {
        self.latency.write().await;
        self.session.require_current().await?;

        if amount == 0 {
            return Err(CoreError::Validation(
                "Gift amount must be greater than zero".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        if amount > state.balance {
            return Err(CoreError::InsufficientBalance {
                required: amount,
                available: state.balance,
            });
        }

        state.balance -= amount;

        let transaction = TransactionRecord {
            id: format!("transaction_{}", Uuid::new_v4()),
            amount,
            kind: TransactionKind::Gift,
            description: "Gift to creator for video".to_string(),
            created_at: Utc::now(),
            video_id: Some(video_id.to_string()),
            recipient_id: Some(creator_id.to_string()),
        };
        state.transactions.push(transaction.clone());

        tracing::info!(video_id, creator_id, amount, "gifted creator");

        Ok(transaction)
    }

    /// Deduct a purchase price and log the purchase transaction
    pub async fn deduct_for_purchase(
        &self,
        video_id: &str,
        title: &str,
        amount: u64,
    ) -> CoreResult<TransactionRecord> {
        self.latency.write().await;
        self.session.require_current().await?;

        let mut state = self.state.write().await;
        if amount > state.balance {
            return Err(CoreError::InsufficientBalance {
                required: amount,
                available: state.balance,
            });
        }

        state.balance -= amount;

        let transaction = TransactionRecord {
            id: format!("transaction_{}", Uuid::new_v4()),
            amount,
            kind: TransactionKind::Purchase,
            description: format!("Purchase of video: {}", title),
            created_at: Utc::now(),
            video_id: Some(video_id.to_string()),
            recipient_id: None,
        };
        state.transactions.push(transaction.clone());

        tracing::info!(video_id, amount, "deducted purchase");

        Ok(transaction)
    }

    /// Undo a purchase deduction whose coordinating operation failed
    ///
    /// Restores the balance and drops the transaction record; the logical
    /// purchase never happened, so nothing of it may remain in the log.
    pub(crate) async fn rollback_purchase(&self, transaction_id: &str) {
        let mut state = self.state.write().await;

        if let Some(pos) = state
            .transactions
            .iter()
            .position(|t| t.id == transaction_id && t.kind == TransactionKind::Purchase)
        {
            let transaction = state.transactions.remove(pos);
            state.balance += transaction.amount;
            tracing::warn!(
                transaction_id,
                amount = transaction.amount,
                "rolled back purchase deduction"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionPersist;

    async fn create_test_wallet() -> (WalletStore, Arc<SessionStore>) {
        let session = Arc::new(
            SessionStore::new(Arc::new(MemorySessionPersist::new()), Latency::disabled())
                .await
                .unwrap(),
        );
        let wallet = WalletStore::new(500, Arc::clone(&session), Latency::disabled());
        (wallet, session)
    }

    async fn login_demo(session: &SessionStore) {
        session
            .login("demo@example.com", "password123")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_initial_balance() {
        let (wallet, _session) = create_test_wallet().await;
        assert_eq!(wallet.balance().await, 500);
        assert!(wallet.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_gift_deducts_and_logs() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        let transaction = wallet.gift("short_1", "1", 100).await.unwrap();
        assert_eq!(transaction.amount, 100);
        assert_eq!(transaction.kind, TransactionKind::Gift);
        assert_eq!(transaction.recipient_id.as_deref(), Some("1"));

        assert_eq!(wallet.balance().await, 400);

        let history = wallet.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, transaction.id);
    }

    #[tokio::test]
    async fn test_gift_requires_authentication() {
        let (wallet, _session) = create_test_wallet().await;

        let result = wallet.gift("short_1", "1", 50).await;
        assert!(matches!(result, Err(CoreError::NotAuthenticated)));
        assert_eq!(wallet.balance().await, 500);
    }

    #[tokio::test]
    async fn test_over_balance_gift_leaves_state_unchanged() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        let result = wallet.gift("short_1", "1", 600).await;
        match result.unwrap_err() {
            CoreError::InsufficientBalance {
                required,
                available,
            } => {
                assert_eq!(required, 600);
                assert_eq!(available, 500);
            }
            other => panic!("Expected InsufficientBalance, got {:?}", other),
        }

        assert_eq!(wallet.balance().await, 500);
        assert!(wallet.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_gift_rejected() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        let result = wallet.gift("short_1", "1", 0).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_purchase_deduction_logs_transaction() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        let transaction = wallet
            .deduct_for_purchase("long_1", "Deep Dive Into Topic 1", 29)
            .await
            .unwrap();
        assert_eq!(transaction.kind, TransactionKind::Purchase);
        assert!(transaction.description.contains("Deep Dive"));
        assert!(transaction.recipient_id.is_none());

        assert_eq!(wallet.balance().await, 471);
        assert_eq!(wallet.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rollback_restores_balance_and_log() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        let transaction = wallet
            .deduct_for_purchase("long_1", "Deep Dive Into Topic 1", 150)
            .await
            .unwrap();
        assert_eq!(wallet.balance().await, 350);

        wallet.rollback_purchase(&transaction.id).await;
        assert_eq!(wallet.balance().await, 500);
        assert!(wallet.history().await.is_empty());

        // Rolling back an unknown transaction is a no-op
        wallet.rollback_purchase("transaction_ghost").await;
        assert_eq!(wallet.balance().await, 500);
    }

    #[tokio::test]
    async fn test_history_preserves_order() {
        let (wallet, session) = create_test_wallet().await;
        login_demo(&session).await;

        wallet.gift("short_1", "1", 10).await.unwrap();
        wallet
            .deduct_for_purchase("long_1", "Deep Dive Into Topic 1", 29)
            .await
            .unwrap();
        wallet.gift("short_2", "1", 50).await.unwrap();

        let history = wallet.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].kind, TransactionKind::Gift);
        assert_eq!(history[1].kind, TransactionKind::Purchase);
        assert_eq!(history[2].amount, 50);

        assert_eq!(wallet.balance().await, 411);
    }
}
