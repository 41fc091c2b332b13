use crate::db::models::{DbUser, UserId, from_db_timestamp, to_db_timestamp};
use crate::db::sqlite::SqlitePool;
use crate::error::StudyError;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A duplicate email surfaces as `Conflict`.
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserId, StudyError> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(to_db_timestamp(Utc::now()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StudyError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<DbUser>, StudyError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<DbUser>, StudyError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    fn row_to_model(row: SqliteRow) -> Result<DbUser, StudyError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(DbUser {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password")?,
            created_at: from_db_timestamp(&created_at)?,
        })
    }
}
