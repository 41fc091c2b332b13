use crate::db::models::{UserId, VideoId, to_db_timestamp};
use crate::db::sqlite::SqlitePool;
use crate::error::StudyError;
use chrono::Utc;

#[derive(Clone)]
pub struct LikeStorage {
    pool: SqlitePool,
}

impl LikeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, user_id: UserId, video_id: VideoId) -> Result<bool, StudyError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM video_likes WHERE user_id = ? AND video_id = ?")
                .bind(user_id)
                .bind(video_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    /// Flip the like for `(user, video)` and adjust `videos.likes` in the same transaction.
    /// Returns the state after the flip.
    pub async fn toggle(&self, user_id: UserId, video_id: VideoId) -> Result<bool, StudyError> {
        // take the write lock up front so concurrent toggles wait on the busy timeout
        // instead of failing a SHARED -> RESERVED upgrade
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let removed = sqlx::query("DELETE FROM video_likes WHERE user_id = ? AND video_id = ?")
            .bind(user_id)
            .bind(video_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let liked = if removed > 0 {
            // counter never goes below zero, even if it had already drifted
            sqlx::query("UPDATE videos SET likes = MAX(likes - 1, 0) WHERE id = ?")
                .bind(video_id)
                .execute(&mut *tx)
                .await?;
            false
        } else {
            sqlx::query(
                "INSERT INTO video_likes (user_id, video_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(user_id)
            .bind(video_id)
            .bind(to_db_timestamp(Utc::now()))
            .execute(&mut *tx)
            .await?;
            sqlx::query("UPDATE videos SET likes = likes + 1 WHERE id = ?")
                .bind(video_id)
                .execute(&mut *tx)
                .await?;
            true
        };

        tx.commit().await?;
        Ok(liked)
    }

    /// Number of like rows referencing a video.
    pub async fn count_for_video(&self, video_id: VideoId) -> Result<i64, StudyError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM video_likes WHERE video_id = ?")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }
}
