use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::error::StudyError;
use crate::middleware::AuthUser;
use crate::router::StudyState;
use crate::types::{LoginRequest, RegisterRequest};

/// POST /api/auth/register
pub async fn register(
    State(state): State<StudyState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, StudyError>,
) -> Result<(StatusCode, Json<Value>), StudyError> {
    let (name, email, password) = body.validate()?;
    state.auth.register(&name, &email, &password).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<StudyState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, StudyError>,
) -> Result<Json<Value>, StudyError> {
    let (email, password) = body.validate()?;
    let outcome = state.auth.login(&email, &password).await?;
    Ok(Json(json!({
        "message": "Login successful",
        "token": outcome.token,
        "user": outcome.user,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<StudyState>,
    user: AuthUser,
) -> Result<Json<Value>, StudyError> {
    let profile = state.auth.profile(user.id).await?;
    Ok(Json(json!({ "user": profile })))
}
