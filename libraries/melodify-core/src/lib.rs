//! Melodify Core
//!
//! Catalog domain types shared by the playback engine and the applications.
//!
//! The catalog is the read-only collaborator the player consumes from: tracks,
//! playlists, albums and artists, as produced by the hosted backend. Nothing in
//! this crate mutates a catalog after it has been loaded.
//!
//! # Example
//!
//! ```rust
//! use melodify_core::{Catalog, Track};
//! use std::time::Duration;
//!
//! let json = r#"{
//!     "tracks": [{
//!         "id": "t1",
//!         "title": "Midnight Drive",
//!         "artist": "Neon Waves",
//!         "album": "Synthwave Dreams",
//!         "duration": 234,
//!         "cover_ref": "covers/1.jpg",
//!         "audio_ref": "audio/1.mp3"
//!     }]
//! }"#;
//!
//! let catalog = Catalog::from_json_str(json).unwrap();
//! let track: &Track = catalog.track("t1").unwrap();
//! assert_eq!(track.duration, Duration::from_secs(234));
//! assert_eq!(melodify_core::format_time(track.duration), "3:54");
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod types;

pub use catalog::{Catalog, SearchResults};
pub use error::{CoreError, Result};
pub use format::format_time;
pub use types::{duration_secs, Album, Artist, Playlist, Track};
