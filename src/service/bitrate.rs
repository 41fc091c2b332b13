//! Bitrate and file-size estimates for a video of known length.
//!
//! Two independent scenarios feed the result:
//! - a known file size gives the average bitrate needed to hit it;
//! - a known resolution gives streaming targets from a fixed lookup table.

use crate::error::StudyError;
use serde::{Deserialize, Serialize};

/// Kilobits in one megabyte.
const KILOBITS_PER_MB: f64 = 8192.0;
const DEFAULT_FPS: f64 = 30.0;
const HIGH_MOTION_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BitrateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Calculation {
    #[serde(rename = "File Size Based", rename_all = "camelCase")]
    FileSizeBased {
        bitrate_kbps: i64,
        bitrate_mbps: String,
        note: String,
    },
    #[serde(rename = "Streaming Target (Standard)", rename_all = "camelCase")]
    StreamingStandard {
        bitrate_mbps: f64,
        #[serde(rename = "estimatedFileSizeMB")]
        estimated_file_size_mb: String,
        note: String,
    },
    #[serde(rename = "Streaming Target (High Motion)", rename_all = "camelCase")]
    StreamingHighMotion {
        bitrate_mbps: f64,
        #[serde(rename = "estimatedFileSizeMB")]
        estimated_file_size_mb: String,
        note: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EstimateResult {
    pub input: BitrateRequest,
    /// File-size based entries come first; clients read `calculations[0]` as the headline.
    pub calculations: Vec<Calculation>,
    pub assumptions: Vec<String>,
}

/// Baseline streaming bitrate in Mbps for a resolution label, or `None` if unknown.
pub fn recommended_mbps(resolution: &str, fps: f64) -> Option<f64> {
    let high_fps = fps > DEFAULT_FPS;
    let mbps = match resolution.trim().to_ascii_lowercase().as_str() {
        "4k" | "2160p" => {
            if high_fps {
                60.0
            } else {
                40.0
            }
        }
        "1440p" | "2k" => {
            if high_fps {
                24.0
            } else {
                16.0
            }
        }
        "1080p" => {
            if high_fps {
                12.0
            } else {
                8.0
            }
        }
        "720p" => {
            if high_fps {
                7.5
            } else {
                5.0
            }
        }
        "480p" => 2.5,
        _ => return None,
    };
    Some(mbps)
}

pub fn high_motion_mbps(recommended: f64) -> f64 {
    (recommended * HIGH_MOTION_FACTOR).ceil()
}

/// Megabytes produced by `mbps` over `duration_secs`, as a 2-decimal string.
fn estimated_size_mb(mbps: f64, duration_secs: f64) -> String {
    format!("{:.2}", mbps * duration_secs / 8.0)
}

pub fn estimate(req: BitrateRequest) -> Result<EstimateResult, StudyError> {
    let duration = req
        .duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| StudyError::InvalidInput("Duration (in seconds) is required.".into()))?;

    let mut calculations = Vec::new();
    let mut assumptions = Vec::new();

    if let Some(size_mb) = req.file_size.filter(|s| s.is_finite() && *s > 0.0) {
        let bitrate_kbps = (size_mb * KILOBITS_PER_MB / duration).round() as i64;
        calculations.push(Calculation::FileSizeBased {
            bitrate_kbps,
            bitrate_mbps: format!("{:.2}", bitrate_kbps as f64 / 1000.0),
            note: "Actual average bitrate required to match this file size.".to_string(),
        });
        assumptions.push("Calculation includes both video and audio tracks combined.".to_string());
    }

    if let Some(resolution) = req.resolution.as_deref().filter(|r| !r.trim().is_empty()) {
        let fps = req.fps.filter(|f| *f > 0.0).unwrap_or(DEFAULT_FPS);
        if let Some(standard) = recommended_mbps(resolution, fps) {
            let high = high_motion_mbps(standard);
            calculations.push(Calculation::StreamingStandard {
                bitrate_mbps: standard,
                estimated_file_size_mb: estimated_size_mb(standard, duration),
                note: format!("Recommended for {resolution} at {fps}fps (Standard Content)"),
            });
            calculations.push(Calculation::StreamingHighMotion {
                bitrate_mbps: high,
                estimated_file_size_mb: estimated_size_mb(high, duration),
                note: format!("Recommended for {resolution} at {fps}fps (Gaming/Sports)"),
            });
            assumptions.push("Based on standard H.264 streaming guidelines.".to_string());
        }
    }

    if calculations.is_empty() {
        return Err(StudyError::InvalidInput(
            "Please provide either 'fileSize' (MB) OR 'resolution' (e.g. 1080p) to calculate."
                .to_string(),
        ));
    }

    Ok(EstimateResult {
        input: req,
        calculations,
        assumptions,
    })
}
