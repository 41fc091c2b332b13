use crate::db::models::{UserId, VideoId};
use crate::db::{ProgressStorage, VideoStorage};
use crate::error::StudyError;
use crate::service::completion::{CourseCompletion, summarize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone)]
pub struct ProgressService {
    progress: ProgressStorage,
    videos: VideoStorage,
}

impl ProgressService {
    pub fn new(progress: ProgressStorage, videos: VideoStorage) -> Self {
        Self { progress, videos }
    }

    /// Last write wins; an older offset may replace a newer one.
    pub async fn save(
        &self,
        user_id: UserId,
        video_id: VideoId,
        progress_seconds: i64,
    ) -> Result<(), StudyError> {
        self.progress
            .upsert(user_id, video_id, progress_seconds)
            .await?;
        debug!(user_id, video_id, progress_seconds, "progress saved");
        Ok(())
    }

    /// 0 when nothing has been saved yet.
    pub async fn get(&self, user_id: UserId, video_id: VideoId) -> Result<i64, StudyError> {
        Ok(self.progress.get(user_id, video_id).await?.unwrap_or(0))
    }

    pub async fn all(&self, user_id: UserId) -> Result<BTreeMap<VideoId, i64>, StudyError> {
        self.progress.list_for_user(user_id).await
    }

    pub async fn completion(&self, user_id: UserId) -> Result<CourseCompletion, StudyError> {
        let catalog = self.videos.list().await?;
        let progress = self.progress.list_for_user(user_id).await?;
        Ok(summarize(&catalog, &progress))
    }
}
