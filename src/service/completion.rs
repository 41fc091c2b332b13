//! Course completion derived from saved playback offsets.

use crate::db::models::{Video, VideoId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Used when a video carries no parseable duration label.
pub const FALLBACK_DURATION_SECS: i64 = 600;
/// Watched-to-duration ratio a video must exceed to count as complete.
pub const COMPLETION_THRESHOLD: f64 = 0.9;

/// Parse `"MM:SS"` or `"HH:MM:SS"` into seconds, falling back to ten minutes.
pub fn parse_duration(label: Option<&str>) -> i64 {
    let Some(label) = label else {
        return FALLBACK_DURATION_SECS;
    };
    let parts: Option<Vec<i64>> = label
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<i64>().ok().filter(|n| *n >= 0))
        .collect();
    let secs = match parts.as_deref() {
        Some([m, s]) => m * 60 + s,
        Some([h, m, s]) => h * 3600 + m * 60 + s,
        _ => return FALLBACK_DURATION_SECS,
    };
    if secs > 0 {
        secs
    } else {
        FALLBACK_DURATION_SECS
    }
}

pub fn is_complete(progress_seconds: i64, duration_seconds: i64) -> bool {
    duration_seconds > 0 && progress_seconds as f64 / duration_seconds as f64 > COMPLETION_THRESHOLD
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoCompletion {
    pub video_id: VideoId,
    pub progress_seconds: i64,
    pub duration_seconds: i64,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseCompletion {
    pub completed_videos: usize,
    pub total_videos: usize,
    pub percent: f64,
    pub videos: Vec<VideoCompletion>,
}

/// Completion of every catalog video given a user's progress map.
pub fn summarize(catalog: &[Video], progress: &BTreeMap<VideoId, i64>) -> CourseCompletion {
    let videos: Vec<VideoCompletion> = catalog
        .iter()
        .map(|v| {
            let progress_seconds = progress.get(&v.id).copied().unwrap_or(0);
            let duration_seconds = parse_duration(v.duration.as_deref());
            VideoCompletion {
                video_id: v.id,
                progress_seconds,
                duration_seconds,
                complete: is_complete(progress_seconds, duration_seconds),
            }
        })
        .collect();

    let completed_videos = videos.iter().filter(|v| v.complete).count();
    let total_videos = videos.len();
    let percent = if total_videos == 0 {
        0.0
    } else {
        completed_videos as f64 / total_videos as f64 * 100.0
    };

    CourseCompletion {
        completed_videos,
        total_videos,
        percent,
        videos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::MediaKind;
    use chrono::Utc;

    fn video(id: VideoId, duration: Option<&str>) -> Video {
        Video {
            id,
            title: format!("video {id}"),
            description: None,
            thumbnail: None,
            url: "https://example.com/v.mp4".into(),
            kind: MediaKind::Mp4,
            duration: duration.map(str::to_string),
            views: 0,
            likes: 0,
            upload_date: Utc::now(),
            author: "Study App Official".into(),
        }
    }

    #[test]
    fn parses_minute_and_hour_labels() {
        assert_eq!(parse_duration(Some("10:32")), 632);
        assert_eq!(parse_duration(Some("1:02:03")), 3723);
        assert_eq!(parse_duration(Some("bogus")), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration(Some("12")), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration(Some("00:00")), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration(None), FALLBACK_DURATION_SECS);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_complete(90, 100));
        assert!(is_complete(91, 100));
        assert!(!is_complete(0, 100));
    }

    #[test]
    fn summary_counts_complete_videos() {
        let catalog = vec![video(1, Some("01:40")), video(2, Some("10:00")), video(3, None)];
        let progress = BTreeMap::from([(1, 95), (2, 100)]);
        let summary = summarize(&catalog, &progress);
        assert_eq!(summary.total_videos, 3);
        assert_eq!(summary.completed_videos, 1);
        assert!((summary.percent - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.videos[2].progress_seconds, 0);
        assert_eq!(summary.videos[2].duration_seconds, 600);
    }

    #[test]
    fn empty_catalog_is_zero_percent() {
        let summary = summarize(&[], &BTreeMap::new());
        assert_eq!(summary.percent, 0.0);
    }
}
