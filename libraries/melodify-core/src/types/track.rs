/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playable track, as delivered by the catalog
///
/// Immutable once created; identity is by `id`. The `duration` is only a
/// display hint, the player re-derives the real length from the audio
/// resource once its metadata is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Advertised duration (serialized as seconds)
    #[serde(with = "duration_secs", default)]
    pub duration: Duration,

    /// Opaque cover image locator
    #[serde(default)]
    pub cover_ref: String,

    /// Opaque playable-resource locator
    pub audio_ref: String,
}

impl Track {
    /// Create a track with the given identity; the audio locator defaults to the id
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            audio_ref: id.clone(),
            id,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration: Duration::ZERO,
            cover_ref: String::new(),
        }
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the advertised duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the cover image locator
    #[must_use]
    pub fn with_cover(mut self, cover_ref: impl Into<String>) -> Self {
        self.cover_ref = cover_ref.into();
        self
    }

    /// Set the playable-resource locator
    #[must_use]
    pub fn with_audio(mut self, audio_ref: impl Into<String>) -> Self {
        self.audio_ref = audio_ref.into();
        self
    }
}

/// Serde adapter storing a `Duration` as a number of seconds
pub mod duration_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
