use crate::db::VideoStorage;
use crate::db::models::{MediaKind, NewVideo};
use crate::error::StudyError;
use tracing::info;

const INSECURE_BUCKET: &str = "http://commondatastorage.googleapis.com";
const SECURE_BUCKET: &str = "https://commondatastorage.googleapis.com";

struct SeedVideo {
    title: &'static str,
    description: &'static str,
    thumbnail: &'static str,
    url: &'static str,
    kind: MediaKind,
    duration: &'static str,
    views: i64,
}

const DEFAULT_CATALOG: [SeedVideo; 5] = [
    SeedVideo {
        title: "Introduction to React",
        description: "Master the fundamentals of component-based architecture.",
        thumbnail: "https://images.unsplash.com/photo-1633356122544-f134324a6cee?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        kind: MediaKind::Mp4,
        duration: "10:32",
        views: 12402,
    },
    SeedVideo {
        title: "Modern ES6+ Features",
        description: "Elevate your code with advanced JavaScript syntax patterns.",
        thumbnail: "https://images.unsplash.com/photo-1579468118864-1b9ea3c0db4a?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
        kind: MediaKind::Mp4,
        duration: "08:45",
        views: 8300,
    },
    SeedVideo {
        title: "HLS Streaming Protocol",
        description: "Deep dive into adaptive bitrate streaming technologies.",
        thumbnail: "https://images.unsplash.com/photo-1611162617474-5b21e879e113?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        url: "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8",
        kind: MediaKind::Hls,
        duration: "12:15",
        views: 5600,
    },
    SeedVideo {
        title: "Node.js Architecture",
        description: "Building scalable backend services with Express.",
        thumbnail: "https://images.unsplash.com/photo-1627398242450-270171b0e7b3?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        kind: MediaKind::Mp4,
        duration: "15:20",
        views: 15200,
    },
    SeedVideo {
        title: "JWT Security Patterns",
        description: "Implementing stateless authentication systems.",
        thumbnail: "https://images.unsplash.com/photo-1555949963-ff9fe0c870eb?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
        url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        kind: MediaKind::Mp4,
        duration: "09:50",
        views: 9100,
    },
];

fn default_catalog() -> Vec<NewVideo> {
    DEFAULT_CATALOG
        .iter()
        .map(|v| NewVideo {
            title: v.title.to_string(),
            description: Some(v.description.to_string()),
            thumbnail: Some(v.thumbnail.to_string()),
            url: v.url.to_string(),
            kind: v.kind,
            duration: Some(v.duration.to_string()),
            views: v.views,
        })
        .collect()
}

/// Insert the default catalog into an empty `videos` table. Returns the number inserted.
pub async fn seed_catalog(videos: &VideoStorage) -> Result<usize, StudyError> {
    let existing = videos.count().await?;
    if existing > 0 {
        info!(existing, "catalog already populated; skipping seed");
        return Ok(0);
    }
    let ids = videos.insert_many(default_catalog()).await?;
    info!(count = ids.len(), "catalog seeded");
    Ok(ids.len())
}

/// Move legacy `http://` bucket URLs to `https://`. Returns the number of rows changed.
pub async fn upgrade_insecure_urls(videos: &VideoStorage) -> Result<u64, StudyError> {
    let changed = videos
        .replace_url_prefix(INSECURE_BUCKET, SECURE_BUCKET)
        .await?;
    if changed > 0 {
        info!(changed, "video URLs migrated to https");
    }
    Ok(changed)
}
