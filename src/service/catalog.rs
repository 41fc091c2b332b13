use crate::db::models::{UserId, Video, VideoId};
use crate::db::{LikeStorage, VideoStorage};
use crate::error::StudyError;
use tracing::{debug, info};

/// Read access to the catalog plus the like toggle that mutates its counters.
#[derive(Clone)]
pub struct CatalogService {
    videos: VideoStorage,
    likes: LikeStorage,
}

impl CatalogService {
    pub fn new(videos: VideoStorage, likes: LikeStorage) -> Self {
        Self { videos, likes }
    }

    pub async fn list_videos(&self) -> Result<Vec<Video>, StudyError> {
        let videos = self.videos.list().await?;
        debug!(count = videos.len(), "catalog listed");
        Ok(videos)
    }

    pub async fn get_video(&self, id: VideoId) -> Result<Video, StudyError> {
        self.videos
            .get(id)
            .await?
            .ok_or_else(|| StudyError::NotFound("Video not found".to_string()))
    }

    /// Flip the caller's like and return the resulting state.
    pub async fn toggle_like(&self, user_id: UserId, video_id: VideoId) -> Result<bool, StudyError> {
        let liked = self.likes.toggle(user_id, video_id).await?;
        info!(user_id, video_id, liked, "like toggled");
        Ok(liked)
    }

    pub async fn like_status(&self, user_id: UserId, video_id: VideoId) -> Result<bool, StudyError> {
        self.likes.exists(user_id, video_id).await
    }
}
