use crate::db::models::{UserId, VideoId, to_db_timestamp};
use crate::db::sqlite::SqlitePool;
use crate::error::StudyError;
use chrono::Utc;
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct ProgressStorage {
    pool: SqlitePool,
}

impl ProgressStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Upsert by unique (user_id, video_id). The new offset always replaces the old one.
    pub async fn upsert(
        &self,
        user_id: UserId,
        video_id: VideoId,
        progress_seconds: i64,
    ) -> Result<(), StudyError> {
        sqlx::query(
            r#"
            INSERT INTO video_progress (user_id, video_id, progress_seconds, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id, video_id) DO UPDATE SET
                progress_seconds = excluded.progress_seconds,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(video_id)
        .bind(progress_seconds)
        .bind(to_db_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(
        &self,
        user_id: UserId,
        video_id: VideoId,
    ) -> Result<Option<i64>, StudyError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT progress_seconds FROM video_progress WHERE user_id = ? AND video_id = ?",
        )
        .bind(user_id)
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<BTreeMap<VideoId, i64>, StudyError> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT video_id, progress_seconds FROM video_progress WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }
}
