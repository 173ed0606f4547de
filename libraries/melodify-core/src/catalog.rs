//! Read-only catalog of tracks, playlists, albums and artists
//!
//! The catalog is what the surrounding application hands to the player. It is
//! loaded once from a JSON document and only ever read afterwards.

use crate::error::{CoreError, Result};
use crate::types::{Album, Artist, Playlist, Track};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// In-memory catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub tracks: Vec<Track>,

    #[serde(default)]
    pub playlists: Vec<Playlist>,

    #[serde(default)]
    pub albums: Vec<Album>,

    #[serde(default)]
    pub artists: Vec<Artist>,
}

/// Matches for a free-text query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub tracks: Vec<&'a Track>,
    pub artists: Vec<&'a Artist>,
    pub playlists: Vec<&'a Playlist>,
}

impl SearchResults<'_> {
    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty() && self.playlists.is_empty()
    }
}

impl Catalog {
    /// Parse a catalog from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a track by id
    ///
    /// Standalone tracks are searched first, then playlist and album listings,
    /// so a catalog that only ships playlists still resolves its tracks.
    pub fn track(&self, id: &str) -> Result<&Track> {
        self.all_tracks()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("Track", id))
    }

    /// Every track listing in the catalog, duplicates included
    pub fn all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks
            .iter()
            .chain(self.playlists.iter().flat_map(|p| p.tracks.iter()))
            .chain(self.albums.iter().flat_map(|a| a.tracks.iter()))
    }

    /// Look up a playlist by id
    pub fn playlist(&self, id: &str) -> Result<&Playlist> {
        self.playlists
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("Playlist", id))
    }

    /// Look up an album by id
    pub fn album(&self, id: &str) -> Result<&Album> {
        self.albums
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found("Album", id))
    }

    /// Look up an artist by id
    pub fn artist(&self, id: &str) -> Result<&Artist> {
        self.artists
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found("Artist", id))
    }

    /// All standalone tracks credited to `artist` (case-insensitive)
    pub fn tracks_by_artist(&self, artist: &str) -> Vec<&Track> {
        let artist = artist.to_lowercase();
        self.tracks
            .iter()
            .filter(|t| t.artist.to_lowercase() == artist)
            .collect()
    }

    /// Case-insensitive substring search
    ///
    /// Tracks match on title or artist, artists on name, playlists on name or
    /// description. A blank query yields `None`.
    pub fn search(&self, query: &str) -> Option<SearchResults<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let q = query.to_lowercase();
        let hit = |s: &str| s.to_lowercase().contains(&q);

        Some(SearchResults {
            tracks: self
                .tracks
                .iter()
                .filter(|t| hit(&t.title) || hit(&t.artist))
                .collect(),
            artists: self.artists.iter().filter(|a| hit(&a.name)).collect(),
            playlists: self
                .playlists
                .iter()
                .filter(|p| hit(&p.name) || hit(&p.description))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let a = Track::new("1", "Midnight Drive", "Neon Waves");
        let b = Track::new("2", "Ocean Eyes", "Luna Ray");
        let c = Track::new("3", "Hidden", "Ghost Notes");
        let mut playlist = Playlist::new("p1", "Late Night");
        playlist.description = "Chill synth for driving".to_string();
        playlist.tracks = vec![a.clone(), c.clone()];

        Catalog {
            tracks: vec![a, b],
            playlists: vec![playlist],
            albums: vec![],
            artists: vec![Artist {
                id: "ar1".to_string(),
                name: "Neon Waves".to_string(),
                image_ref: String::new(),
                genres: vec!["synthwave".to_string()],
            }],
        }
    }

    #[test]
    fn track_lookup_falls_back_to_playlists() {
        let catalog = sample();
        assert_eq!(catalog.track("3").unwrap().title, "Hidden");
    }

    #[test]
    fn missing_entities_are_not_found() {
        let catalog = sample();
        assert!(matches!(
            catalog.playlist("nope"),
            Err(CoreError::NotFound { entity: "Playlist", .. })
        ));
        assert!(catalog.album("nope").is_err());
        assert!(catalog.artist("nope").is_err());
    }

    #[test]
    fn blank_search_is_none() {
        assert!(sample().search("   ").is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = sample();
        let results = catalog.search("NEON").unwrap();
        assert_eq!(results.tracks.len(), 1);
        assert_eq!(results.artists.len(), 1);
        assert!(results.playlists.is_empty());

        let results = catalog.search("driving").unwrap();
        assert_eq!(results.playlists.len(), 1);
    }

    #[test]
    fn tracks_by_artist_ignores_case() {
        assert_eq!(sample().tracks_by_artist("luna ray").len(), 1);
    }
}
