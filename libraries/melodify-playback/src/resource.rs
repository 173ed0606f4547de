//! Audio resource bridge
//!
//! The engine drives exactly one audio-rendering resource (a media element,
//! an output device wrapper, a simulator). Commands go in through
//! [`AudioResource`]; everything the resource has to say comes back later as
//! a [`ResourceSignal`] on a channel the engine subscribes to when it is
//! constructed.

use crossbeam_channel::Sender;
use std::fmt;
use std::time::Duration;

/// Identifies one start request
///
/// The resource must answer every `start` with exactly one
/// [`ResourceSignal::PlayStarted`] or [`ResourceSignal::PlayFailed`] carrying
/// the same ticket. The engine only honours the most recent outstanding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayTicket(pub u64);

impl fmt::Display for PlayTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one loaded source
///
/// Handed to [`AudioResource::load`]. Time, metadata and end signals carry
/// the id of the source they describe, so signals the previous source left in
/// the channel can be told apart from those of the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Asynchronous notifications from the resource, applied in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceSignal {
    /// Playback clock advanced
    TimeUpdate { load: LoadId, position: Duration },

    /// Metadata for the loaded source is available
    MetadataLoaded { load: LoadId, duration: Duration },

    /// The loaded source played through to its end
    Ended(LoadId),

    /// A start request succeeded
    PlayStarted(PlayTicket),

    /// A start request was rejected (autoplay policy, decode or network error,
    /// or interrupted by a newer load)
    PlayFailed { ticket: PlayTicket, reason: String },
}

/// Sending half of the signal channel, handed to the resource on construction
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: Sender<ResourceSignal>,
}

impl SignalSender {
    pub(crate) fn new(tx: Sender<ResourceSignal>) -> Self {
        Self { tx }
    }

    /// Deliver a signal to the engine
    ///
    /// Returns false once the engine has unsubscribed; signals sent after
    /// that are dropped.
    pub fn send(&self, signal: ResourceSignal) -> bool {
        self.tx.send(signal).is_ok()
    }
}

/// Platform audio-rendering resource
///
/// None of these calls block. Results arrive later as [`ResourceSignal`]s.
/// Time, metadata and end signals are tagged with the [`LoadId`] of the
/// source they belong to; the engine drops any that are not for its latest
/// load.
pub trait AudioResource: Send {
    /// Replace the current source; the new one starts paused at position 0
    fn load(&mut self, load: LoadId, audio_ref: &str);

    /// Ask the resource to start or resume rendering the loaded source
    fn start(&mut self, ticket: PlayTicket);

    /// Stop rendering, keeping the position
    fn pause(&mut self);

    /// Move the playback clock; the resource clamps to the source length
    fn set_position(&mut self, position: Duration);

    /// Apply output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Stop everything before the engine lets go of the resource
    ///
    /// Equivalent to `pause()` unless the platform has more to tear down.
    fn release(&mut self) {
        self.pause();
    }
}

/// Builds the resource the first time the engine needs one
pub type ResourceFactory = Box<dyn FnOnce(SignalSender) -> Box<dyn AudioResource> + Send>;
