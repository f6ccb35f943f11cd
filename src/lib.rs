/// Boom Core - mock backend for the Boom video sharing app
///
/// In-memory catalog, wallet, and session stores with simulated network
/// latency, consumed by the Boom presentation layer. There is no real
/// transport; the stores are the backend.

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod latency;
pub mod logging;
pub mod media;
pub mod notify;
pub mod session;
pub mod validation;
pub mod wallet;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{CoreError, CoreResult};
