use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StudyError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    /// Login failure. The message differs between "no such user" and "wrong password"
    /// but both map onto the same status.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Figment error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<figment::Error> for StudyError {
    fn from(e: figment::Error) -> Self {
        StudyError::Figment(Box::new(e))
    }
}

impl From<argon2::password_hash::Error> for StudyError {
    fn from(e: argon2::password_hash::Error) -> Self {
        StudyError::PasswordHash(e.to_string())
    }
}

/// Unparseable, wrong-typed or non-JSON bodies are input errors like any missing field.
impl From<JsonRejection> for StudyError {
    fn from(rejection: JsonRejection) -> Self {
        StudyError::InvalidInput(rejection.body_text())
    }
}

impl StudyError {
    pub fn status(&self) -> StatusCode {
        match self {
            StudyError::InvalidInput(_)
            | StudyError::Conflict(_)
            | StudyError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            StudyError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            StudyError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            StudyError::InvalidInput(_) => "INVALID_INPUT",
            StudyError::Conflict(_) => "CONFLICT",
            StudyError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            StudyError::Unauthenticated(_) => "UNAUTHORIZED",
            StudyError::NotFound(_) => "NOT_FOUND",
            StudyError::DatabaseError(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for StudyError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
