use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::db::models::{Video, VideoId};
use crate::error::StudyError;
use crate::middleware::AuthUser;
use crate::router::StudyState;

#[derive(Debug, Serialize)]
pub struct LikeState {
    pub liked: bool,
}

/// GET /api/videos
pub async fn list_videos(State(state): State<StudyState>) -> Result<Json<Vec<Video>>, StudyError> {
    Ok(Json(state.catalog.list_videos().await?))
}

/// GET /api/videos/{id}
pub async fn get_video(
    State(state): State<StudyState>,
    _user: AuthUser,
    Path(id): Path<VideoId>,
) -> Result<Json<Video>, StudyError> {
    Ok(Json(state.catalog.get_video(id).await?))
}

/// POST /api/videos/{id}/like
pub async fn toggle_like(
    State(state): State<StudyState>,
    user: AuthUser,
    Path(id): Path<VideoId>,
) -> Result<Json<LikeState>, StudyError> {
    let liked = state.catalog.toggle_like(user.id, id).await?;
    Ok(Json(LikeState { liked }))
}

/// GET /api/videos/{id}/like
pub async fn like_status(
    State(state): State<StudyState>,
    user: AuthUser,
    Path(id): Path<VideoId>,
) -> Result<Json<LikeState>, StudyError> {
    let liked = state.catalog.like_status(user.id, id).await?;
    Ok(Json(LikeState { liked }))
}
