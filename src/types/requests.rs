//! Request bodies as the browser client sends them.

use crate::db::models::VideoId;
use crate::error::StudyError;
use serde::Deserialize;

/// A JSON number or a numeric string. Route parameters reach the client as strings and
/// are posted back unchanged.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberOrString::Int(n) => Some(*n as f64),
            NumberOrString::Float(f) => Some(*f),
            NumberOrString::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|f| f.is_finite())
    }

    fn as_id(&self) -> Option<i64> {
        let id = match self {
            NumberOrString::Int(n) => Some(*n),
            NumberOrString::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            NumberOrString::Float(_) => None,
            NumberOrString::Text(s) => s.trim().parse::<i64>().ok(),
        };
        id.filter(|id| *id > 0)
    }
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// `(name, email, password)`, all non-empty.
    pub fn validate(self) -> Result<(String, String, String), StudyError> {
        match (
            required(self.name),
            required(self.email),
            required(self.password),
        ) {
            (Some(name), Some(email), Some(password)) => Ok((name, email, password)),
            _ => Err(StudyError::InvalidInput("All fields are required".to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), StudyError> {
        match (required(self.email), required(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(StudyError::InvalidInput(
                "Email and password required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    #[serde(default)]
    pub video_id: Option<NumberOrString>,
    #[serde(default)]
    pub progress: Option<NumberOrString>,
}

impl SaveProgressRequest {
    /// `(video_id, whole seconds)`. Zero seconds is valid; a missing value is not.
    pub fn validate(self) -> Result<(VideoId, i64), StudyError> {
        let missing = || StudyError::InvalidInput("Video ID and progress are required".to_string());
        let video_id = self.video_id.as_ref().and_then(|v| v.as_id()).ok_or_else(missing)?;
        let progress = self.progress.as_ref().and_then(|p| p.as_f64()).ok_or_else(missing)?;
        if progress < 0.0 {
            return Err(StudyError::InvalidInput(
                "Progress must not be negative".to_string(),
            ));
        }
        Ok((video_id, progress.floor() as i64))
    }
}
