/// Catalog data models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Video delivery kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoKind {
    /// Inline autoplaying clip, always free
    #[serde(rename = "short-form")]
    Short,
    /// Externally hosted video, optionally priced
    #[serde(rename = "long-form")]
    Long,
}

/// Reference to the identity that created a video or comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatorRef {
    pub id: String,
    pub handle: String,
    pub avatar_url: Option<String>,
}

/// A comment on a video
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: CreatorRef,
}

/// A video in the catalog
///
/// `purchased` is relative to the viewer the record was annotated for; the
/// stored library always keeps it false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: VideoKind,
    pub media_url: String,
    pub thumbnail_url: String,
    pub price: u64,
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub creator: CreatorRef,
    /// Newest first
    pub comments: Vec<CommentRecord>,
}

impl VideoRecord {
    /// Whether the annotated viewer may play this video
    pub fn playable(&self) -> bool {
        self.price == 0 || self.purchased
    }
}

/// Metadata for a new upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUpload {
    pub title: String,
    pub description: String,
    pub kind: VideoKind,
    /// External URL for long-form uploads; short-form media arrives as a blob
    pub media_url: Option<String>,
    pub price: Option<u64>,
}
