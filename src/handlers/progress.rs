use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::db::models::VideoId;
use crate::error::StudyError;
use crate::middleware::AuthUser;
use crate::router::StudyState;
use crate::service::completion::CourseCompletion;
use crate::types::SaveProgressRequest;

/// POST /api/progress
pub async fn save_progress(
    State(state): State<StudyState>,
    user: AuthUser,
    WithRejection(Json(body), _): WithRejection<Json<SaveProgressRequest>, StudyError>,
) -> Result<Json<Value>, StudyError> {
    let (video_id, seconds) = body.validate()?;
    state.progress.save(user.id, video_id, seconds).await?;
    Ok(Json(json!({ "message": "Progress saved" })))
}

/// GET /api/progress/{videoId}
pub async fn get_progress(
    State(state): State<StudyState>,
    user: AuthUser,
    Path(video_id): Path<VideoId>,
) -> Result<Json<Value>, StudyError> {
    let seconds = state.progress.get(user.id, video_id).await?;
    Ok(Json(json!({ "progress": seconds })))
}

/// GET /api/progress
pub async fn all_progress(
    State(state): State<StudyState>,
    user: AuthUser,
) -> Result<Json<BTreeMap<VideoId, i64>>, StudyError> {
    Ok(Json(state.progress.all(user.id).await?))
}

/// GET /api/progress/completion
pub async fn completion(
    State(state): State<StudyState>,
    user: AuthUser,
) -> Result<Json<CourseCompletion>, StudyError> {
    Ok(Json(state.progress.completion(user.id).await?))
}
