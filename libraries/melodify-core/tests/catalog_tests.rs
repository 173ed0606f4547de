//! Catalog loading tests
//!
//! Exercises the JSON document shape the backend exports.

use melodify_core::{Catalog, CoreError};
use std::io::Write;
use std::time::Duration;

const CATALOG: &str = r#"{
    "tracks": [
        {
            "id": "1",
            "title": "Midnight Drive",
            "artist": "Neon Waves",
            "album": "Synthwave Dreams",
            "duration": 234,
            "cover_ref": "covers/1.jpg",
            "audio_ref": "audio/SoundHelix-Song-1.mp3"
        },
        {
            "id": "2",
            "title": "Ocean Eyes",
            "artist": "Luna Ray",
            "duration": 198.5,
            "audio_ref": "audio/SoundHelix-Song-2.mp3"
        }
    ],
    "playlists": [
        {
            "id": "p1",
            "name": "Today's Top Hits",
            "description": "The hottest tracks right now",
            "tracks": [
                {
                    "id": "2",
                    "title": "Ocean Eyes",
                    "artist": "Luna Ray",
                    "duration": 198.5,
                    "audio_ref": "audio/SoundHelix-Song-2.mp3"
                },
                {
                    "id": "1",
                    "title": "Midnight Drive",
                    "artist": "Neon Waves",
                    "duration": 234,
                    "audio_ref": "audio/SoundHelix-Song-1.mp3"
                }
            ],
            "created_by": "Melodify"
        }
    ],
    "albums": [
        {
            "id": "al1",
            "name": "Synthwave Dreams",
            "artist": "Neon Waves",
            "year": 2024
        }
    ],
    "artists": [
        { "id": "ar1", "name": "Neon Waves", "genres": ["Synthwave", "Electronic"] }
    ]
}"#;

#[test]
fn loads_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let catalog = Catalog::from_path(file.path()).unwrap();

    assert_eq!(catalog.tracks.len(), 2);
    assert_eq!(catalog.playlists.len(), 1);
    assert_eq!(catalog.albums[0].year, Some(2024));
    assert!(catalog.albums[0].tracks.is_empty());
    assert_eq!(catalog.artists[0].genres.len(), 2);
}

#[test]
fn optional_fields_take_defaults() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let track = catalog.track("2").unwrap();

    assert_eq!(track.album, "");
    assert_eq!(track.cover_ref, "");
    assert_eq!(track.duration, Duration::from_millis(198_500));
}

#[test]
fn playlist_keeps_document_order() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let playlist = catalog.playlist("p1").unwrap();

    let ids: Vec<&str> = playlist.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(playlist.position_of("1"), Some(1));
    assert_eq!(
        playlist.total_duration(),
        Duration::from_millis(198_500 + 234_000)
    );
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = Catalog::from_json_str("{ \"tracks\": [ { \"id\": 1 } ] }").unwrap_err();
    assert!(matches!(err, CoreError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}
