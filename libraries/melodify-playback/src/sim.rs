//! Simulated audio resource
//!
//! A deterministic stand-in for a real output: nothing is decoded and time
//! only moves when [`SimulatedDevice::advance`] is called. Start requests are
//! answered on [`SimulatedDevice::settle`], which lets callers (and tests)
//! interleave commands with in-flight starts the way a real platform would.

use crate::resource::{
    AudioResource, LoadId, PlayTicket, ResourceFactory, ResourceSignal, SignalSender,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Length used for sources with no registered duration
pub const DEFAULT_MEDIA_DURATION: Duration = Duration::from_secs(180);

#[derive(Debug)]
enum Pending {
    Metadata(LoadId, Duration),
    Start(PlayTicket),
}

#[derive(Debug)]
struct SimState {
    // Environment
    default_duration: Duration,
    durations: HashMap<String, Duration>,
    unavailable: HashSet<String>,
    autoplay_blocked: bool,
    constructed: usize,

    // Resource
    sender: Option<SignalSender>,
    load: Option<LoadId>,
    source: Option<String>,
    media_duration: Duration,
    position: Duration,
    rendering: bool,
    volume: f32,
    pending: Vec<Pending>,
}

impl SimState {
    fn send(&self, signal: ResourceSignal) -> bool {
        self.sender.as_ref().is_some_and(|tx| tx.send(signal))
    }

    /// Reject every start still waiting for an answer
    fn abort_pending(&mut self, reason: &str) {
        let pending = std::mem::take(&mut self.pending);
        for item in pending {
            if let Pending::Start(ticket) = item {
                self.send(ResourceSignal::PlayFailed {
                    ticket,
                    reason: reason.to_string(),
                });
            }
        }
    }

    fn source_playable(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|source| !self.unavailable.contains(source))
    }
}

/// Handle to the simulated output
///
/// Cloning shares the same device. The engine owns the resource built by
/// [`factory`](Self::factory); the device handle stays with the caller to
/// drive time and inspect what the resource is doing.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedDevice {
    /// Create a device whose sources last [`DEFAULT_MEDIA_DURATION`]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                default_duration: DEFAULT_MEDIA_DURATION,
                durations: HashMap::new(),
                unavailable: HashSet::new(),
                autoplay_blocked: false,
                constructed: 0,
                sender: None,
                load: None,
                source: None,
                media_duration: Duration::ZERO,
                position: Duration::ZERO,
                rendering: false,
                volume: 1.0,
                pending: Vec::new(),
            })),
        }
    }

    /// Use a different length for unregistered sources
    pub fn with_default_duration(self, duration: Duration) -> Self {
        self.lock().default_duration = duration;
        self
    }

    /// Register the length of one source
    pub fn set_media_duration(&self, audio_ref: impl Into<String>, duration: Duration) {
        self.lock().durations.insert(audio_ref.into(), duration);
    }

    /// Make a source fail to start, like a missing file or a decode error
    pub fn mark_unavailable(&self, audio_ref: impl Into<String>) {
        self.lock().unavailable.insert(audio_ref.into());
    }

    /// Reject every start request, like a browser autoplay policy
    pub fn block_autoplay(&self, blocked: bool) {
        self.lock().autoplay_blocked = blocked;
    }

    /// Factory to hand to [`PlaybackEngine::new`](crate::PlaybackEngine::new)
    pub fn factory(&self) -> ResourceFactory {
        let state = Arc::clone(&self.state);
        Box::new(move |sender| {
            {
                let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                guard.constructed += 1;
                guard.sender = Some(sender);
            }
            Box::new(SimulatedResource { state }) as Box<dyn AudioResource>
        })
    }

    /// Answer outstanding metadata and start requests, in request order
    ///
    /// Returns the number of signals delivered.
    pub fn settle(&self) -> usize {
        let mut state = self.lock();
        let pending = std::mem::take(&mut state.pending);
        let mut delivered = 0;

        for item in pending {
            let signal = match item {
                Pending::Metadata(load, duration) => {
                    ResourceSignal::MetadataLoaded { load, duration }
                }
                Pending::Start(ticket) => {
                    if state.autoplay_blocked {
                        ResourceSignal::PlayFailed {
                            ticket,
                            reason: "playback was not allowed without user interaction"
                                .to_string(),
                        }
                    } else if !state.source_playable() {
                        ResourceSignal::PlayFailed {
                            ticket,
                            reason: format!(
                                "source unavailable: {}",
                                state.source.as_deref().unwrap_or("<none>")
                            ),
                        }
                    } else {
                        // A source that played to its end starts over.
                        if state.position >= state.media_duration {
                            state.position = Duration::ZERO;
                            if let Some(load) = state.load {
                                let rewound = ResourceSignal::TimeUpdate {
                                    load,
                                    position: Duration::ZERO,
                                };
                                if state.send(rewound) {
                                    delivered += 1;
                                }
                            }
                        }
                        state.rendering = true;
                        ResourceSignal::PlayStarted(ticket)
                    }
                }
            };
            if state.send(signal) {
                delivered += 1;
            }
        }

        delivered
    }

    /// Let `elapsed` of wall time pass
    ///
    /// While rendering, the clock moves forward (capped at the source length)
    /// and a time update is emitted; reaching the end stops rendering and
    /// emits `Ended`.
    pub fn advance(&self, elapsed: Duration) {
        let mut state = self.lock();
        if !state.rendering {
            return;
        }
        let Some(load) = state.load else {
            return;
        };

        state.position = (state.position + elapsed).min(state.media_duration);
        let position = state.position;
        state.send(ResourceSignal::TimeUpdate { load, position });

        if position >= state.media_duration {
            state.rendering = false;
            state.send(ResourceSignal::Ended(load));
        }
    }

    /// Source currently loaded into the resource
    pub fn source(&self) -> Option<String> {
        self.lock().source.clone()
    }

    /// Whether the resource is producing audio
    pub fn is_rendering(&self) -> bool {
        self.lock().rendering
    }

    /// Resource-side playback clock
    pub fn position(&self) -> Duration {
        self.lock().position
    }

    /// Output volume last applied
    pub fn volume(&self) -> f32 {
        self.lock().volume
    }

    /// How many resources the factory has built
    pub fn constructed_count(&self) -> usize {
        self.lock().constructed
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource half of a [`SimulatedDevice`]
#[derive(Debug)]
pub struct SimulatedResource {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedResource {
    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioResource for SimulatedResource {
    fn load(&mut self, load: LoadId, audio_ref: &str) {
        let mut state = self.lock();
        state.abort_pending("interrupted by a new load");

        state.rendering = false;
        state.load = Some(load);
        state.position = Duration::ZERO;
        state.source = Some(audio_ref.to_string());
        state.media_duration = state
            .durations
            .get(audio_ref)
            .copied()
            .unwrap_or(state.default_duration);

        if state.source_playable() {
            let duration = state.media_duration;
            state.pending.push(Pending::Metadata(load, duration));
        }
    }

    fn start(&mut self, ticket: PlayTicket) {
        self.lock().pending.push(Pending::Start(ticket));
    }

    fn pause(&mut self) {
        let mut state = self.lock();
        state.abort_pending("interrupted by a call to pause");
        state.rendering = false;
    }

    fn set_position(&mut self, position: Duration) {
        let mut state = self.lock();
        let Some(load) = state.load else {
            return;
        };
        state.position = position.min(state.media_duration);
        let position = state.position;
        state.send(ResourceSignal::TimeUpdate { load, position });
    }

    fn set_volume(&mut self, volume: f32) {
        self.lock().volume = volume.clamp(0.0, 1.0);
    }

    fn release(&mut self) {
        let mut state = self.lock();
        state.abort_pending("resource released");
        state.rendering = false;
        state.sender = None;
    }
}
