/// Catalog store
///
/// Single owner of the video library and the feed view over it. Pages are
/// loaded incrementally behind an in-flight guard; records handed out are
/// always annotated with the requesting viewer's purchase status.
use crate::{
    catalog::models::{CommentRecord, CreatorRef, VideoKind, VideoRecord, VideoUpload},
    catalog::seed,
    error::{CoreError, CoreResult},
    latency::Latency,
    media::store::{MediaBlob, MediaStore},
    session::{Identity, SessionStore},
    validation::{validate_comment_text, validation_errors_to_core_error, UploadValidator},
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Mutable catalog state, all behind one lock
struct CatalogState {
    /// Full mock library, newest first
    library: Vec<VideoRecord>,
    /// Ids of feed entries in loaded-page order
    feed: Vec<String>,
    /// Next page to fetch, 1-based
    next_page: usize,
    end_of_feed: bool,
    load_in_flight: bool,
    /// (viewer id, video id) pairs
    purchases: HashSet<(String, String)>,
}

/// Catalog store service
pub struct CatalogStore {
    state: RwLock<CatalogState>,
    session: Arc<SessionStore>,
    media: Arc<MediaStore>,
    validator: UploadValidator,
    page_size: usize,
    latency: Latency,
}

impl CatalogStore {
    /// Create an empty catalog store
    pub fn new(
        session: Arc<SessionStore>,
        media: Arc<MediaStore>,
        page_size: usize,
        latency: Latency,
    ) -> Self {
        Self {
            state: RwLock::new(CatalogState {
                library: Vec::new(),
                feed: Vec::new(),
                next_page: 1,
                end_of_feed: false,
                load_in_flight: false,
                purchases: HashSet::new(),
            }),
            session,
            media,
            validator: UploadValidator::new(),
            page_size,
            latency,
        }
    }

    /// Populate the demo library; a no-op once any record exists
    pub async fn seed_demo_library(&self) {
        let mut state = self.state.write().await;
        if !state.library.is_empty() {
            return;
        }
        state.library = seed::demo_library();
        tracing::info!(count = state.library.len(), "seeded demo catalog");
    }

    /// Load the next feed page
    ///
    /// Returns `None` without touching state while a load is already in
    /// flight or after the end of the feed was reached. An empty page marks
    /// end-of-feed permanently.
    pub async fn load_page(&self) -> CoreResult<Option<Vec<VideoRecord>>> {
        {
            let mut state = self.state.write().await;
            if state.load_in_flight || state.end_of_feed {
                return Ok(None);
            }
            state.load_in_flight = true;
        }

        self.latency.read().await;
        let viewer = self.session.current().await;

        let mut state = self.state.write().await;
        state.load_in_flight = false;

        let page = state.next_page;
        let start = (page - 1) * self.page_size;
        let records: Vec<VideoRecord> = state
            .library
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|r| Self::annotate(r, viewer.as_ref(), &state.purchases))
            .collect();

        if records.is_empty() {
            state.end_of_feed = true;
            tracing::debug!(page, "feed reached end of data");
            return Ok(Some(records));
        }

        for record in &records {
            if !state.feed.iter().any(|id| id == &record.id) {
                state.feed.push(record.id.clone());
            }
        }
        state.next_page += 1;

        tracing::debug!(page, count = records.len(), "loaded feed page");

        Ok(Some(records))
    }

    /// Snapshot of all loaded feed entries in page order
    pub async fn feed(&self) -> Vec<VideoRecord> {
        let viewer = self.session.current().await;
        let state = self.state.read().await;

        state
            .feed
            .iter()
            .filter_map(|id| state.library.iter().find(|r| &r.id == id))
            .map(|r| Self::annotate(r, viewer.as_ref(), &state.purchases))
            .collect()
    }

    /// Fetch a single record annotated for the current viewer
    pub async fn fetch_one(&self, id: &str) -> CoreResult<VideoRecord> {
        self.latency.read().await;
        let viewer = self.session.current().await;
        let state = self.state.read().await;

        state
            .library
            .iter()
            .find(|r| r.id == id)
            .map(|r| Self::annotate(r, viewer.as_ref(), &state.purchases))
            .ok_or_else(|| CoreError::NotFound(format!("Video {} not found", id)))
    }

    /// Append a comment and return the refreshed record
    pub async fn append_comment(&self, video_id: &str, text: &str) -> CoreResult<VideoRecord> {
        validate_comment_text(text)?;

        self.latency.write().await;
        let viewer = self.session.require_current().await?;

        let mut state = self.state.write().await;
        let idx = state
            .library
            .iter()
            .position(|r| r.id == video_id)
            .ok_or_else(|| CoreError::NotFound(format!("Video {} not found", video_id)))?;

        let comment = CommentRecord {
            id: format!("comment_{}", Uuid::new_v4()),
            text: text.to_string(),
            created_at: Utc::now(),
            author: CreatorRef {
                id: viewer.id.clone(),
                handle: viewer.handle.clone(),
                avatar_url: viewer.avatar_url.clone(),
            },
        };

        // Newest first
        state.library[idx].comments.insert(0, comment);

        let record = state.library[idx].clone();
        tracing::debug!(video_id, "appended comment");

        Ok(Self::annotate(&record, Some(&viewer), &state.purchases))
    }

    /// Mark a video purchased for the current viewer
    ///
    /// Balance movement is owned by the purchase coordinator; this only flips
    /// the viewer-relative flag.
    pub async fn record_purchase(&self, video_id: &str) -> CoreResult<VideoRecord> {
        self.latency.write().await;
        let viewer = self.session.require_current().await?;

        let mut state = self.state.write().await;
        let idx = state
            .library
            .iter()
            .position(|r| r.id == video_id)
            .ok_or_else(|| CoreError::NotFound(format!("Video {} not found", video_id)))?;

        state
            .purchases
            .insert((viewer.id.clone(), video_id.to_string()));

        let record = state.library[idx].clone();
        tracing::info!(video_id, viewer = %viewer.handle, "recorded purchase");

        Ok(Self::annotate(&record, Some(&viewer), &state.purchases))
    }

    /// Validate and add a new upload, newest first
    ///
    /// Resets feed pagination so the next page load starts over from page
    /// one, which now begins with the new record.
    pub async fn upload(
        &self,
        upload: VideoUpload,
        blob: Option<MediaBlob>,
    ) -> CoreResult<VideoRecord> {
        self.latency.upload().await;
        let viewer = self.session.require_current().await?;

        self.validator
            .validate(&upload, blob.as_ref())
            .map_err(validation_errors_to_core_error)?;

        let media_url = match upload.kind {
            VideoKind::Short => {
                let blob = blob.ok_or_else(|| {
                    CoreError::InvalidUpload("Short-form upload requires a media file".to_string())
                })?;
                self.media.store(&blob).await?
            }
            VideoKind::Long => upload
                .media_url
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };

        let id = format!("video_{}", Uuid::new_v4());
        let record = VideoRecord {
            id: id.clone(),
            title: upload.title.trim().to_string(),
            description: upload.description,
            kind: upload.kind,
            media_url,
            thumbnail_url: format!("https://picsum.photos/seed/{}/400/225", id),
            price: upload.price.unwrap_or(0),
            purchased: false,
            created_at: Utc::now(),
            views: 0,
            creator: CreatorRef {
                id: viewer.id,
                handle: viewer.handle,
                avatar_url: viewer.avatar_url,
            },
            comments: Vec::new(),
        };

        let mut state = self.state.write().await;
        state.library.insert(0, record.clone());
        state.feed.clear();
        state.next_page = 1;
        state.end_of_feed = false;

        tracing::info!(video = %record.id, kind = ?record.kind, "uploaded video");

        Ok(record)
    }

    fn annotate(
        record: &VideoRecord,
        viewer: Option<&Identity>,
        purchases: &HashSet<(String, String)>,
    ) -> VideoRecord {
        let mut out = record.clone();
        out.purchased = viewer
            .map(|v| purchases.contains(&(v.id.clone(), record.id.clone())))
            .unwrap_or(false);
        out
    }
}
