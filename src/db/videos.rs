use crate::db::models::{MediaKind, NewVideo, Video, VideoId, from_db_timestamp, to_db_timestamp};
use crate::db::sqlite::SqlitePool;
use crate::error::StudyError;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

const VIDEO_COLUMNS: &str = "id, title, description, thumbnail, url, type, duration, views, \
                             likes, upload_date, author";

#[derive(Clone)]
pub struct VideoStorage {
    pool: SqlitePool,
}

impl VideoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whole catalog, newest upload first.
    pub async fn list(&self) -> Result<Vec<Video>, StudyError> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY upload_date DESC, id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn get(&self, id: VideoId) -> Result<Option<Video>, StudyError> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn count(&self) -> Result<i64, StudyError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Batch insert using a single transaction. Returns ids in the same order.
    pub async fn insert_many(&self, items: Vec<NewVideo>) -> Result<Vec<VideoId>, StudyError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(items.len());
        let uploaded = to_db_timestamp(Utc::now());

        for video in items.into_iter() {
            let done = sqlx::query(
                r#"
                INSERT INTO videos (
                    title, description, thumbnail, url, type, duration, views, upload_date
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(video.title)
            .bind(video.description)
            .bind(video.thumbnail)
            .bind(video.url)
            .bind(video.kind.as_str())
            .bind(video.duration)
            .bind(video.views)
            .bind(uploaded.clone())
            .execute(&mut *tx)
            .await?;
            ids.push(done.last_insert_rowid());
        }

        tx.commit().await?;
        Ok(ids)
    }

    /// Swap a URL prefix in place. Returns the number of rows changed.
    pub async fn replace_url_prefix(&self, from: &str, to: &str) -> Result<u64, StudyError> {
        let done = sqlx::query(
            "UPDATE videos SET url = ? || substr(url, ?) WHERE substr(url, 1, ?) = ?",
        )
        .bind(to)
        .bind(from.len() as i64 + 1)
        .bind(from.len() as i64)
        .bind(from)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected())
    }

    fn row_to_model(row: SqliteRow) -> Result<Video, StudyError> {
        let kind: String = row.try_get("type")?;
        let upload_date: String = row.try_get("upload_date")?;
        Ok(Video {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            thumbnail: row.try_get("thumbnail")?,
            url: row.try_get("url")?,
            kind: kind
                .parse::<MediaKind>()
                .map_err(|e| sqlx::Error::Decode(e.into()))?,
            duration: row.try_get("duration")?,
            views: row.try_get("views")?,
            likes: row.try_get("likes")?,
            upload_date: from_db_timestamp(&upload_date)?,
            author: row.try_get("author")?,
        })
    }
}
