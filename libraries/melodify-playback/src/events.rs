//! Player Events
//!
//! Event-based communication for view synchronization. Events are emitted at
//! key points:
//! - State changes (play/pause, track loaded)
//! - Track changes
//! - Position and duration updates (mirrored from the resource)
//! - Settings changes (volume, shuffle, repeat)
//! - Start failures

use crate::types::{PlaybackState, RepeatMode};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport state changed (idle, paused, playing)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Playback position changed
    PositionChanged {
        /// Current playback position
        position_ms: u64,
    },

    /// Total duration of the current track became known
    DurationChanged {
        /// Track duration as reported by the resource
        duration_ms: u64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        muted: bool,
    },

    /// Queue changed (tracks added/removed/reordered/consumed)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },

    /// Repeat mode changed
    RepeatChanged { mode: RepeatMode },

    /// Track finished playing naturally (reached end)
    TrackEnded {
        /// ID of the finished track
        track_id: String,
    },

    /// The resource could not start rendering
    PlaybackFailed {
        /// ID of the track that failed
        track_id: String,
        /// Reason reported by the resource
        message: String,
    },
}
