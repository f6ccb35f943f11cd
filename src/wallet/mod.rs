/// Wallet
///
/// Owns the session balance and the append-only transaction log. Every
/// spend routes through this store so the displayed balance stays
/// consistent across the presentation layer.

pub mod models;
pub mod store;

pub use models::{TransactionKind, TransactionRecord};
pub use store::WalletStore;
