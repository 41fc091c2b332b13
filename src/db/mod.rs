//! Database module: models, schema and per-table storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and schema bootstrap
//! - `users.rs`, `videos.rs`, `likes.rs`, `progress.rs`: one storage type per table

pub mod likes;
pub mod models;
pub mod progress;
pub mod schema;
pub mod sqlite;
pub mod users;
pub mod videos;

pub use likes::LikeStorage;
pub use models::{DbUser, MediaKind, NewVideo, PublicUser, UserId, UserSummary, Video, VideoId};
pub use progress::ProgressStorage;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, connect, init_schema};
pub use users::UserStorage;
pub use videos::VideoStorage;
