/// Video catalog
///
/// Owns the in-memory video library, feed pagination, comments, and
/// viewer-relative purchase flags.

pub mod models;
pub mod seed;
pub mod store;

pub use models::{CommentRecord, CreatorRef, VideoKind, VideoRecord, VideoUpload};
pub use store::CatalogStore;
