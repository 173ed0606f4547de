//! Core types for playback management

use melodify_core::{duration_secs, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport state, derived from whether a track is loaded and whether it
/// should be rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Track loaded, not rendering
    Paused,

    /// Track loaded and rendering
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop advancing when the queue runs out
    #[default]
    Off,

    /// Restart the last submitted playlist when the queue runs out
    All,

    /// Loop the current track when it ends
    One,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// What happens when a track ends naturally and there is nothing to advance to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueEndBehavior {
    /// Leave `is_playing` untouched (the last track stays current and flagged
    /// as playing even though the resource has gone quiet)
    #[default]
    Hold,

    /// Transition to Paused, keeping the last track loaded
    Pause,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume in `[0, 1]` (default: 0.7)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Natural end of the last track with `repeat` off (default: Hold)
    pub on_queue_end: QueueEndBehavior,

    /// Fixed seed for shuffles; entropy when `None`
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: RepeatMode::Off,
            on_queue_end: QueueEndBehavior::Hold,
            shuffle_seed: None,
        }
    }
}

/// Consistent copy of everything a view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub current_track: Option<Track>,
    pub state: PlaybackState,
    pub is_playing: bool,
    #[serde(with = "duration_secs")]
    pub position: Duration,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    pub volume: f32,
    pub muted: bool,
    pub queue: Vec<Track>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}
