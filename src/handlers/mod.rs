pub mod auth;
pub mod progress;
pub mod utils;
pub mod videos;
