//! Local viewer preferences persisted as one JSON file.
//!
//! Holds favorites, the autoplay toggle and cached playback offsets for a single
//! viewer. Nothing here touches the shared database.

use crate::db::models::VideoId;
use crate::error::StudyError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub favorites: BTreeSet<VideoId>,
    pub autoplay: bool,
    pub offsets: BTreeMap<VideoId, i64>,
}

impl Preferences {
    /// Returns whether the video is a favorite afterwards.
    pub fn toggle_favorite(&mut self, video_id: VideoId) -> bool {
        if self.favorites.remove(&video_id) {
            false
        } else {
            self.favorites.insert(video_id);
            true
        }
    }

    pub fn is_favorite(&self, video_id: VideoId) -> bool {
        self.favorites.contains(&video_id)
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    pub fn remember_offset(&mut self, video_id: VideoId, seconds: i64) {
        self.offsets.insert(video_id, seconds.max(0));
    }

    pub fn offset_for(&self, video_id: VideoId) -> i64 {
        self.offsets.get(&video_id).copied().unwrap_or(0)
    }
}

/// File-backed store with an explicit load/save contract.
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file yields defaults; an unreadable or corrupt one is an error.
    pub fn load(&self) -> Result<Preferences, StudyError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "preferences file not found; using defaults");
            return Ok(Preferences::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write through a sibling temp file so a crash never leaves half a document behind.
    pub fn save(&self, prefs: &Preferences) -> Result<(), StudyError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(prefs)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}
