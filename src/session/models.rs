/// Session identity models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated identity as seen by the rest of the system
///
/// This is the exact shape handed to the persistence collaborator; it must
/// never carry credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub handle: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// In-memory credential record backing the mock account table
#[derive(Debug, Clone)]
pub struct Credential {
    pub identity: Identity,
    /// SHA-256 digest of the password, hex-encoded
    pub password_digest: String,
}
