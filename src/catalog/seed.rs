/// Demo catalog data
///
/// Mirrors the launch demo: five free short-form clips and five long-form
/// videos, the odd-numbered ones priced. Built at construction time by the
/// owning store rather than living in module globals.
use crate::catalog::models::{CommentRecord, CreatorRef, VideoKind, VideoRecord};
use chrono::{Duration, Utc};
use rand::Rng;

fn demo_creator() -> CreatorRef {
    CreatorRef {
        id: "1".to_string(),
        handle: "demo_user".to_string(),
        avatar_url: Some("https://i.pravatar.cc/150?img=1".to_string()),
    }
}

/// Build the demo video library, shorts first
pub(crate) fn demo_library() -> Vec<VideoRecord> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let mut library = Vec::with_capacity(10);

    for i in 1..=5u32 {
        library.push(VideoRecord {
            id: format!("short_{}", i),
            title: format!("Amazing Short Video {}", i),
            description: format!("This is a short video demonstration #{}", i),
            kind: VideoKind::Short,
            media_url: format!(
                "https://assets.mixkit.co/videos/preview/mixkit-people-walking-in-a-city-sidewalk-{}-large.mp4",
                40348 + i
            ),
            thumbnail_url: format!("https://picsum.photos/seed/short{}/400/225", i),
            price: 0,
            purchased: false,
            created_at: now - Duration::hours(i64::from(i)),
            views: rng.gen_range(0..10_000),
            creator: demo_creator(),
            comments: vec![CommentRecord {
                id: format!("comment_short_{}_1", i),
                text: "This is amazing!".to_string(),
                created_at: now - Duration::hours(1),
                author: CreatorRef {
                    id: "2".to_string(),
                    handle: "viewer1".to_string(),
                    avatar_url: Some("https://i.pravatar.cc/150?img=2".to_string()),
                },
            }],
        });
    }

    for i in 1..=5u32 {
        library.push(VideoRecord {
            id: format!("long_{}", i),
            title: format!("Deep Dive Into Topic {}", i),
            description: format!("A comprehensive tutorial on an interesting topic #{}", i),
            kind: VideoKind::Long,
            media_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            thumbnail_url: format!("https://picsum.photos/seed/long{}/400/225", i),
            price: if i % 2 == 0 { 0 } else { u64::from(29 * i) },
            purchased: false,
            created_at: now - Duration::hours(i64::from(2 * i)),
            views: rng.gen_range(0..5_000),
            creator: demo_creator(),
            comments: vec![CommentRecord {
                id: format!("comment_long_{}_1", i),
                text: "Very informative, thanks!".to_string(),
                created_at: now - Duration::hours(2),
                author: CreatorRef {
                    id: "3".to_string(),
                    handle: "viewer2".to_string(),
                    avatar_url: Some("https://i.pravatar.cc/150?img=3".to_string()),
                },
            }],
        });
    }

    library
}
