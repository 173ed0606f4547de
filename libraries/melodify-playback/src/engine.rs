//! Playback engine - core orchestration
//!
//! Owns transport state, the play queue, shuffle/repeat modes and volume, and
//! keeps the single audio resource in step with them. Every mutation goes
//! through a method here; views read [`PlayerSnapshot`]s and drained
//! [`PlayerEvent`]s and never touch the resource.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    queue::Queue,
    resource::{
        AudioResource, LoadId, PlayTicket, ResourceFactory, ResourceSignal, SignalSender,
    },
    shuffle::shuffled,
    types::{PlaybackConfig, PlaybackState, PlayerSnapshot, QueueEndBehavior, RepeatMode},
    volume::Volume,
};
use crossbeam_channel::Receiver;
use melodify_core::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Central playback state machine
///
/// States are derived from `(current track loaded?, is_playing)`:
/// - `Idle`: nothing loaded
/// - `Paused`: loaded, not rendering
/// - `Playing`: loaded, rendering (or asked to)
///
/// The audio resource is built lazily by the factory passed to [`new`], the
/// first time a track has to be loaded, and reused for every later track.
/// Its signals arrive on a channel created here and are applied by [`pump`].
///
/// [`new`]: PlaybackEngine::new
/// [`pump`]: PlaybackEngine::pump
pub struct PlaybackEngine {
    // Transport
    current_track: Option<Track>,
    is_playing: bool,
    position: Duration,
    duration: Duration,

    // Queue and settings
    queue: Queue,
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    on_queue_end: QueueEndBehavior,
    rng: StdRng,

    // Resource bridge
    resource: Option<Box<dyn AudioResource>>,
    factory: Option<ResourceFactory>,
    signal_tx: Option<SignalSender>,
    signals: Option<Receiver<ResourceSignal>>,
    current_load: Option<LoadId>,
    next_load: u64,
    pending_start: Option<PlayTicket>,
    next_ticket: u64,
    source_ended: bool,

    // Diagnostics and view sync
    last_error: Option<PlaybackError>,
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackEngine {
    /// Create a new engine and subscribe to resource signals
    ///
    /// `factory` is called at most once, when the first track is loaded.
    pub fn new<F>(config: PlaybackConfig, factory: F) -> Self
    where
        F: FnOnce(SignalSender) -> Box<dyn AudioResource> + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            current_track: None,
            is_playing: false,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            queue: Queue::new(),
            volume: Volume::new(config.volume),
            shuffle: config.shuffle,
            repeat: config.repeat,
            on_queue_end: config.on_queue_end,
            rng,
            resource: None,
            factory: Some(Box::new(factory)),
            signal_tx: Some(SignalSender::new(tx)),
            signals: Some(rx),
            current_load: None,
            next_load: 1,
            pending_start: None,
            next_ticket: 1,
            source_ended: false,
            last_error: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play `track`, or resume the loaded track when `None`
    pub fn play(&mut self, track: Option<Track>) {
        match track {
            Some(track) => self.play_track(track),
            None => self.resume(),
        }
    }

    /// Load `track` (replacing whatever was loaded) and start rendering it
    pub fn play_track(&mut self, track: Track) {
        if !self.is_active() {
            return;
        }
        self.load_track(track);
        self.start_rendering();
    }

    /// Resume the loaded track from its current position
    ///
    /// No-op when nothing is loaded or the resource is already rendering.
    /// A track that played to its end is started again even though the
    /// engine still reports it as playing.
    pub fn resume(&mut self) {
        if !self.is_active() || self.current_track.is_none() {
            return;
        }
        if self.is_playing && !self.source_ended {
            return;
        }
        self.start_rendering();
    }

    /// Pause playback; the position freezes where it is
    pub fn pause(&mut self) {
        if !self.is_active() || self.current_track.is_none() || !self.is_playing {
            return;
        }

        // A start still in flight must not flip us back to playing.
        self.pending_start = None;
        if let Some(resource) = self.resource.as_deref_mut() {
            resource.pause();
        }
        self.set_playing(false);
    }

    /// Pause when playing, resume otherwise
    pub fn toggle(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Skip to the next track
    ///
    /// Takes the head of the queue; with an empty queue and `repeat = all`
    /// the last submitted playlist starts over. Otherwise nothing changes.
    pub fn next(&mut self) {
        if !self.is_active() {
            return;
        }
        self.advance();
    }

    /// Restart the current track from the beginning
    ///
    /// There is no play history: this never navigates to an earlier track.
    pub fn previous(&mut self) {
        if !self.is_active() || self.current_track.is_none() {
            return;
        }
        self.restart_current();
    }

    // ===== Seek =====

    /// Seek within the current track
    ///
    /// The reported position updates immediately; the resource clamps to the
    /// real track length and corrects it with its next time update.
    pub fn seek(&mut self, position: Duration) {
        if !self.is_active() || self.current_track.is_none() {
            return;
        }
        if let Some(resource) = self.resource.as_deref_mut() {
            resource.set_position(position);
        }
        self.set_position(position);
    }

    /// Seek to a fraction of the known duration
    ///
    /// `fraction` is clamped to `[0, 1]`. No-op until the resource has
    /// reported a duration.
    pub fn seek_percent(&mut self, fraction: f32) {
        if !fraction.is_finite() || self.duration.is_zero() {
            return;
        }
        let target = self.duration.mul_f32(fraction.clamp(0.0, 1.0));
        self.seek(target);
    }

    // ===== Volume =====

    /// Set volume, clamped to `[0, 1]`; NaN and infinities are ignored
    pub fn set_volume(&mut self, level: f32) {
        if !self.is_active() {
            return;
        }
        if self.volume.set_level(level) {
            self.apply_volume();
        }
    }

    /// Mute audio, keeping the level
    pub fn mute(&mut self) {
        if !self.is_active() || self.volume.is_muted() {
            return;
        }
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        if !self.is_active() || !self.volume.is_muted() {
            return;
        }
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if !self.is_active() {
            return;
        }
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Queue Management =====

    /// Append a track to the end of the queue
    pub fn add_to_queue(&mut self, track: Track) {
        if !self.is_active() {
            return;
        }
        self.queue.push_back(track);
        self.emit_queue_changed();
    }

    /// Put a track at the front of the queue
    pub fn play_next(&mut self, track: Track) {
        if !self.is_active() {
            return;
        }
        self.queue.push_front(track);
        self.emit_queue_changed();
    }

    /// Remove the first queued entry with this id
    pub fn remove_from_queue(&mut self, track_id: &str) -> Option<Track> {
        if !self.is_active() {
            return None;
        }
        let removed = self.queue.remove(track_id);
        if removed.is_some() {
            self.emit_queue_changed();
        }
        removed
    }

    /// Move a queued entry
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.is_active() {
            return Err(PlaybackError::ShutDown);
        }
        self.queue.reorder(from, to)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Empty the queue
    ///
    /// The last submitted playlist is kept for `repeat = all`.
    pub fn clear_queue(&mut self) {
        if !self.is_active() {
            return;
        }
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Replace the queue with a playlist and start playing it
    ///
    /// Without shuffle, playback starts at `start_index` and the queue holds
    /// the rest of the playlist wrapped around to its beginning. With
    /// shuffle, a random permutation is used and `start_index` only has to
    /// be in range. An empty playlist changes nothing.
    pub fn play_playlist(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if !self.is_active() {
            return Err(PlaybackError::ShutDown);
        }
        if tracks.is_empty() {
            return Ok(());
        }
        if start_index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start_index,
                len: tracks.len(),
            });
        }

        let (first, rest) = if self.shuffle {
            let mut order = shuffled(&tracks, &mut self.rng);
            let first = order.remove(0);
            (first, order)
        } else {
            let first = tracks[start_index].clone();
            let rest = tracks[start_index + 1..]
                .iter()
                .chain(&tracks[..start_index])
                .cloned()
                .collect();
            (first, rest)
        };

        debug!(
            "Loading playlist of {} tracks (shuffle: {})",
            tracks.len(),
            self.shuffle
        );
        self.queue.load_playlist(tracks, rest);
        self.emit_queue_changed();
        self.play_track(first);
        Ok(())
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle; the existing queue keeps its order
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    /// Set shuffle; the existing queue keeps its order
    pub fn set_shuffle(&mut self, enabled: bool) {
        if !self.is_active() || self.shuffle == enabled {
            return;
        }
        self.shuffle = enabled;
        self.pending_events
            .push(PlayerEvent::ShuffleChanged { enabled });
    }

    /// Cycle repeat `Off -> All -> One -> Off`
    pub fn toggle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if !self.is_active() || self.repeat == mode {
            return;
        }
        self.repeat = mode;
        self.pending_events.push(PlayerEvent::RepeatChanged { mode });
    }

    // ===== Resource Signals =====

    /// Apply every signal the resource has delivered so far, in order
    ///
    /// Returns how many signals were applied. Signals produced while applying
    /// (a new load aborting an in-flight start, for example) are picked up in
    /// the same call.
    pub fn pump(&mut self) -> usize {
        let Some(signals) = self.signals.clone() else {
            return 0;
        };

        let mut applied = 0;
        while let Ok(signal) = signals.try_recv() {
            self.handle_signal(signal);
            applied += 1;
        }
        applied
    }

    /// Apply a single resource signal
    pub fn handle_signal(&mut self, signal: ResourceSignal) {
        if !self.is_active() {
            return;
        }

        match signal {
            ResourceSignal::TimeUpdate { load, position } => {
                if self.is_current_load(load) {
                    self.set_position(position);
                }
            }
            ResourceSignal::MetadataLoaded { load, duration } => {
                if self.is_current_load(load) {
                    self.duration = duration;
                    self.pending_events.push(PlayerEvent::DurationChanged {
                        duration_ms: duration.as_millis() as u64,
                    });
                }
            }
            ResourceSignal::Ended(load) => {
                if self.is_current_load(load) {
                    self.handle_track_ended();
                }
            }
            ResourceSignal::PlayStarted(ticket) => {
                if self.pending_start == Some(ticket) {
                    self.pending_start = None;
                } else {
                    debug!("Ignoring stale play confirmation {}", ticket);
                }
            }
            ResourceSignal::PlayFailed { ticket, reason } => {
                if self.pending_start == Some(ticket) {
                    self.handle_start_failed(reason);
                } else {
                    debug!("Ignoring stale play failure {}: {}", ticket, reason);
                }
            }
        }
    }

    // ===== Lifecycle =====

    /// Stop playback, release the resource and unsubscribe from its signals
    ///
    /// Every command is a no-op afterwards. Also runs on drop.
    pub fn shutdown(&mut self) {
        if !self.is_active() {
            return;
        }

        if let Some(mut resource) = self.resource.take() {
            resource.release();
            info!("Audio resource released");
        }
        self.factory = None;
        self.signal_tx = None;
        self.signals = None;
        self.pending_start = None;
        self.set_playing(false);
    }

    /// False once [`shutdown`](Self::shutdown) has run
    pub fn is_active(&self) -> bool {
        self.signals.is_some()
    }

    // ===== State Queries =====

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether playback should be rendering now
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Position in the current track, as last reported (or sought)
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the current track; zero until the resource reports it
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Volume level in `[0, 1]`
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Upcoming tracks, next first
    pub fn queue(&self) -> Vec<&Track> {
        self.queue.iter().collect()
    }

    /// Playlist retained for `repeat = all`
    pub fn original_queue(&self) -> &[Track] {
        self.queue.original()
    }

    /// Get current shuffle flag
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Get current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Most recent start failure
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    /// Everything a view needs, in one consistent copy
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.current_track.clone(),
            state: self.state(),
            is_playing: self.is_playing,
            position: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            queue: self.queue.to_vec(),
            shuffle: self.shuffle,
            repeat: self.repeat,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// The audio resource, built on first use
    fn resource(&mut self) -> Option<&mut (dyn AudioResource + 'static)> {
        if self.resource.is_none() {
            let factory = self.factory.take()?;
            let sender = self.signal_tx.take()?;
            let mut resource = factory(sender);
            resource.set_volume(self.volume.gain());
            info!("Audio resource constructed");
            self.resource = Some(resource);
        }
        self.resource.as_deref_mut()
    }

    fn load_track(&mut self, track: Track) {
        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());

        // Whatever was starting belongs to the old source.
        self.pending_start = None;
        self.source_ended = false;
        let load = LoadId(self.next_load);
        self.next_load += 1;
        self.current_load = Some(load);

        if let Some(resource) = self.resource() {
            resource.load(load, &track.audio_ref);
        }
        debug!("Loaded track {} ({}) as {}", track.id, track.audio_ref, load);

        let track_id = track.id.clone();
        self.current_track = Some(track);
        self.duration = Duration::ZERO;
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
        self.set_position(Duration::ZERO);
    }

    fn start_rendering(&mut self) {
        let ticket = PlayTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_start = Some(ticket);
        self.source_ended = false;

        if let Some(resource) = self.resource() {
            resource.start(ticket);
        }
        self.set_playing(true);
    }

    fn restart_current(&mut self) {
        if let Some(resource) = self.resource.as_deref_mut() {
            resource.set_position(Duration::ZERO);
        }
        self.set_position(Duration::ZERO);
    }

    /// Advance algorithm shared by `next` and natural track end
    ///
    /// Returns false when there was nothing to advance to.
    fn advance(&mut self) -> bool {
        if let Some(track) = self.queue.pop_next() {
            self.emit_queue_changed();
            self.play_track(track);
            return true;
        }

        if self.repeat == RepeatMode::All {
            if let Some(track) = self.queue.restart_cycle(self.shuffle, &mut self.rng) {
                debug!("Queue exhausted, restarting playlist");
                self.emit_queue_changed();
                self.play_track(track);
                return true;
            }
        }

        false
    }

    fn handle_track_ended(&mut self) {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) else {
            return;
        };
        self.pending_events.push(PlayerEvent::TrackEnded { track_id });
        self.source_ended = true;

        if self.repeat == RepeatMode::One {
            self.restart_current();
            self.start_rendering();
            return;
        }

        if !self.advance() && self.on_queue_end == QueueEndBehavior::Pause {
            self.pending_start = None;
            self.set_playing(false);
        }
    }

    fn is_current_load(&self, load: LoadId) -> bool {
        let current = self.current_load == Some(load);
        if !current {
            debug!("Ignoring signal for stale source {}", load);
        }
        current
    }

    fn handle_start_failed(&mut self, reason: String) {
        self.pending_start = None;
        let track_id = self
            .current_track
            .as_ref()
            .map(|t| t.id.clone())
            .unwrap_or_default();

        warn!("Playback of {} failed to start: {}", track_id, reason);
        self.pending_events.push(PlayerEvent::PlaybackFailed {
            track_id: track_id.clone(),
            message: reason.clone(),
        });
        self.last_error = Some(PlaybackError::StartFailed { track_id, reason });
        self.set_playing(false);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        self.pending_events.push(PlayerEvent::StateChanged {
            state: self.state(),
        });
    }

    fn set_position(&mut self, position: Duration) {
        self.position = position;
        self.pending_events.push(PlayerEvent::PositionChanged {
            position_ms: position.as_millis() as u64,
        });
    }

    fn apply_volume(&mut self) {
        if let Some(resource) = self.resource.as_deref_mut() {
            resource.set_volume(self.volume.gain());
        }
        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
