/// Session management
///
/// Owns the active authenticated identity and the mock credential table.
/// The identity survives restarts through a pluggable persistence
/// collaborator; credentials never leave process memory.

pub mod models;
pub mod persist;
pub mod store;

pub use models::{Credential, Identity};
pub use persist::{DiskSessionPersist, MemorySessionPersist, SessionPersist};
pub use store::SessionStore;
