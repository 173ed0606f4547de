/// Album domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Album with its track listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique album identifier
    pub id: String,

    /// Album name
    pub name: String,

    /// Album artist
    pub artist: String,

    /// Opaque cover image locator
    #[serde(default)]
    pub cover_ref: String,

    /// Release year
    #[serde(default)]
    pub year: Option<u32>,

    /// Tracks in disc order
    #[serde(default)]
    pub tracks: Vec<Track>,
}
