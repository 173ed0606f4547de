/// Playlist domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Curated, ordered list of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Opaque cover image locator
    #[serde(default)]
    pub cover_ref: String,

    /// Tracks in playlist order
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Display name of the creator
    #[serde(default)]
    pub created_by: String,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cover_ref: String::new(),
            tracks: Vec::new(),
            created_by: String::new(),
        }
    }

    /// Position of a track in this playlist
    pub fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Sum of the advertised track durations
    pub fn total_duration(&self) -> std::time::Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }
}
