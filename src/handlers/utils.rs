use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::error::StudyError;
use crate::service::bitrate::{BitrateRequest, EstimateResult, estimate};

/// POST /api/utils/bitrate
pub async fn bitrate(
    WithRejection(Json(body), _): WithRejection<Json<BitrateRequest>, StudyError>,
) -> Result<Json<EstimateResult>, StudyError> {
    Ok(Json(estimate(body)?))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}
