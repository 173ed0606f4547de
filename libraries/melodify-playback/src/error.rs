//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The resource refused or failed to start rendering a track
    #[error("Playback of '{track_id}' failed to start: {reason}")]
    StartFailed { track_id: String, reason: String },

    /// Index out of bounds
    #[error("Index out of bounds: {index} (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The engine has been shut down
    #[error("Playback engine has been shut down")]
    ShutDown,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
