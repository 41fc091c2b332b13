use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type VideoId = i64;

/// Full `users` row, including the password hash. Never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DbUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile view returned by `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Identity echoed back on login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<DbUser> for PublicUser {
    fn from(u: DbUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

impl From<&DbUser> for UserSummary {
    fn from(u: &DbUser) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Mp4,
    Hls,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Mp4 => "mp4",
            MediaKind::Hls => "hls",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp4" => Ok(MediaKind::Mp4),
            "hls" => Ok(MediaKind::Hls),
            other => Err(format!("unknown media kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Human readable, e.g. `"10:32"`.
    pub duration: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub upload_date: DateTime<Utc>,
    pub author: String,
}

/// Catalog entry to insert; the id, counters and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub url: String,
    pub kind: MediaKind,
    pub duration: Option<String>,
    pub views: i64,
}

pub(crate) fn to_db_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn from_db_timestamp(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
