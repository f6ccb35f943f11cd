/// Session store
///
/// Mock authentication service: an in-memory credential table, one active
/// identity, and external persistence of that identity across restarts.
use crate::{
    error::{CoreError, CoreResult},
    latency::Latency,
    session::models::{Credential, Identity},
    session::persist::SessionPersist,
};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session store service
pub struct SessionStore {
    users: RwLock<Vec<Credential>>,
    active: RwLock<Option<Identity>>,
    persist: Arc<dyn SessionPersist>,
    latency: Latency,
}

impl SessionStore {
    /// Create a new session store
    ///
    /// Seeds the demo account and restores a previously persisted identity
    /// so a returning user is signed in without re-entering credentials.
    pub async fn new(persist: Arc<dyn SessionPersist>, latency: Latency) -> CoreResult<Self> {
        let demo = Credential {
            identity: Identity {
                id: "1".to_string(),
                handle: "demo_user".to_string(),
                email: "demo@example.com".to_string(),
                avatar_url: Some("https://i.pravatar.cc/150?img=1".to_string()),
                created_at: Utc::now(),
            },
            password_digest: Self::digest_password("password123"),
        };

        let restored = persist.load().await?;
        if let Some(identity) = &restored {
            tracing::info!(handle = %identity.handle, "restored persisted session");
        }

        Ok(Self {
            users: RwLock::new(vec![demo]),
            active: RwLock::new(restored),
            persist,
            latency,
        })
    }

    /// Authenticate and activate an identity
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<Identity> {
        self.latency.write().await;

        let digest = Self::digest_password(password);
        let identity = {
            let users = self.users.read().await;
            users
                .iter()
                .find(|c| c.identity.email == email && c.password_digest == digest)
                .map(|c| c.identity.clone())
        };

        // Unknown email and wrong password are indistinguishable to the caller
        let identity = identity.ok_or(CoreError::InvalidCredentials)?;

        self.persist.save(&identity).await?;
        let mut active = self.active.write().await;
        *active = Some(identity.clone());

        tracing::info!(handle = %identity.handle, "logged in");

        Ok(identity)
    }

    /// Create and activate a new identity
    pub async fn register(
        &self,
        handle: &str,
        email: &str,
        password: &str,
    ) -> CoreResult<Identity> {
        self.latency.write().await;

        self.validate_handle(handle)?;
        self.validate_email(email)?;

        let mut users = self.users.write().await;
        if users.iter().any(|c| c.identity.email == email) {
            return Err(CoreError::AlreadyExists(
                "Email already registered".to_string(),
            ));
        }

        let identity = Identity {
            id: format!("user_{}", Uuid::new_v4()),
            handle: handle.to_string(),
            email: email.to_string(),
            avatar_url: Some(Self::random_avatar_url()),
            created_at: Utc::now(),
        };

        users.push(Credential {
            identity: identity.clone(),
            password_digest: Self::digest_password(password),
        });
        drop(users);

        self.persist.save(&identity).await?;
        let mut active = self.active.write().await;
        *active = Some(identity.clone());

        tracing::info!(handle = %identity.handle, "registered new account");

        Ok(identity)
    }

    /// Clear the active identity and its external persistence
    ///
    /// Idempotent: logging out while signed out is a no-op.
    pub async fn logout(&self) -> CoreResult<()> {
        let mut active = self.active.write().await;
        if active.take().is_some() {
            tracing::info!("logged out");
        }
        drop(active);

        self.persist.clear().await?;

        Ok(())
    }

    /// The active identity, if any
    pub async fn current(&self) -> Option<Identity> {
        self.active.read().await.clone()
    }

    /// The active identity, or `NotAuthenticated`
    pub async fn require_current(&self) -> CoreResult<Identity> {
        self.current().await.ok_or(CoreError::NotAuthenticated)
    }

    /// Hex-encoded SHA-256 digest used by the mock credential table
    fn digest_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    fn random_avatar_url() -> String {
        use rand::Rng;
        let img = rand::thread_rng().gen_range(0..70);
        format!("https://i.pravatar.cc/150?img={}", img)
    }

    /// Validate handle format
    fn validate_handle(&self, handle: &str) -> CoreResult<()> {
        if handle.is_empty() {
            return Err(CoreError::Validation("Handle cannot be empty".to_string()));
        }

        if handle.len() < 3 {
            return Err(CoreError::Validation(
                "Handle must be at least 3 characters".to_string(),
            ));
        }

        if handle.len() > 30 {
            return Err(CoreError::Validation("Handle too long".to_string()));
        }

        if !handle
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::Validation(
                "Handle contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate email format
    fn validate_email(&self, email: &str) -> CoreResult<()> {
        if !email.contains('@') {
            return Err(CoreError::Validation("Invalid email format".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::persist::MemorySessionPersist;

    async fn create_test_store() -> SessionStore {
        SessionStore::new(Arc::new(MemorySessionPersist::new()), Latency::disabled())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_demo_user() {
        let store = create_test_store().await;

        let identity = store.login("demo@example.com", "password123").await.unwrap();
        assert_eq!(identity.handle, "demo_user");
        assert_eq!(store.current().await.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let store = create_test_store().await;

        let result = store.login("nobody@example.com", "password123").await;
        match result.unwrap_err() {
            CoreError::InvalidCredentials => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }

        // Active identity remains none
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = create_test_store().await;

        let result = store.login("demo@example.com", "hunter2").await;
        assert!(matches!(result, Err(CoreError::InvalidCredentials)));
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_register_and_activate() {
        let store = create_test_store().await;

        let identity = store
            .register("alice", "alice@example.com", "secret123")
            .await
            .unwrap();

        assert_eq!(identity.handle, "alice");
        assert_eq!(store.current().await, Some(identity.clone()));

        // New credentials work for a later login
        store.logout().await.unwrap();
        let again = store.login("alice@example.com", "secret123").await.unwrap();
        assert_eq!(again.id, identity.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = create_test_store().await;

        let result = store
            .register("copycat", "demo@example.com", "secret123")
            .await;
        match result.unwrap_err() {
            CoreError::AlreadyExists(_) => {}
            other => panic!("Expected AlreadyExists, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_invalid_handle() {
        let store = create_test_store().await;

        assert!(store
            .register("a", "short@example.com", "secret123")
            .await
            .is_err());
        assert!(store
            .register("bad handle!", "spaced@example.com", "secret123")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = create_test_store().await;

        store.login("demo@example.com", "password123").await.unwrap();
        store.logout().await.unwrap();
        assert!(store.current().await.is_none());

        store.logout().await.unwrap();
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_session_restored_from_persistence() {
        let persist = Arc::new(MemorySessionPersist::new());

        let store = SessionStore::new(Arc::clone(&persist) as Arc<dyn SessionPersist>, Latency::disabled())
            .await
            .unwrap();
        store.login("demo@example.com", "password123").await.unwrap();
        drop(store);

        // A fresh store over the same backend picks up the identity
        let restored = SessionStore::new(persist, Latency::disabled()).await.unwrap();
        assert_eq!(restored.current().await.unwrap().handle, "demo_user");
    }

    #[tokio::test]
    async fn test_require_current_when_signed_out() {
        let store = create_test_store().await;

        let result = store.require_current().await;
        assert!(matches!(result, Err(CoreError::NotAuthenticated)));
    }
}
