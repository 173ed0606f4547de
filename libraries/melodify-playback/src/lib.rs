//! Melodify - Playback Engine
//!
//! The single authority over what is playing in a Melodify client.
//!
//! This crate provides:
//! - Transport control (play, pause, toggle, next, previous, seek)
//! - A play queue with "add to queue" and "play next"
//! - Playlist playback with wrap-around ordering
//! - Shuffle (uniform random permutation) and repeat modes (Off, All, One)
//! - Volume and mute
//! - Events and snapshots for views
//!
//! # Architecture
//!
//! The engine never renders audio itself. It drives one [`AudioResource`]
//! (built lazily by a factory the platform supplies) and applies the
//! resource's [`ResourceSignal`]s when [`PlaybackEngine::pump`] is called.
//! Start requests carry a [`PlayTicket`] so a late answer for a track the
//! user has already skipped is ignored, and every load gets a [`LoadId`] so
//! time and end signals left over from the previous source are dropped.
//!
//! [`SimulatedDevice`] is a deterministic resource for tools and tests.
//!
//! # Example
//!
//! ```rust
//! use melodify_core::Track;
//! use melodify_playback::{PlaybackConfig, PlaybackEngine, PlaybackState, SimulatedDevice};
//! use std::time::Duration;
//!
//! let device = SimulatedDevice::new();
//! let mut engine = PlaybackEngine::new(PlaybackConfig::default(), device.factory());
//!
//! let playlist = vec![
//!     Track::new("a", "Intro", "Artist").with_duration(Duration::from_secs(90)),
//!     Track::new("b", "Outro", "Artist").with_duration(Duration::from_secs(120)),
//! ];
//! engine.play_playlist(playlist, 1).unwrap();
//! device.settle();
//! engine.pump();
//!
//! assert_eq!(engine.state(), PlaybackState::Playing);
//! assert_eq!(engine.current_track().unwrap().id, "b");
//! assert_eq!(engine.queue()[0].id, "a");
//!
//! engine.pause();
//! assert_eq!(engine.state(), PlaybackState::Paused);
//! ```

mod engine;
mod error;
pub mod events;
mod queue;
pub mod resource;
mod shuffle;
pub mod sim;
pub mod types;
mod volume;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use queue::Queue;
pub use resource::{
    AudioResource, LoadId, PlayTicket, ResourceFactory, ResourceSignal, SignalSender,
};
pub use shuffle::{shuffle_tracks, shuffled};
pub use sim::{SimulatedDevice, SimulatedResource};
pub use types::{PlaybackConfig, PlaybackState, PlayerSnapshot, QueueEndBehavior, RepeatMode};
pub use volume::Volume;
