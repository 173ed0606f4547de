//! Player session
//!
//! Composition root: owns the catalog, the simulated device and the playback
//! engine, and turns script commands into engine calls.

use crate::command::Command;
use crate::config::PlayerSettings;
use crate::error::{CliError, Result};
use crate::render;
use melodify_core::Catalog;
use melodify_playback::{PlaybackEngine, PlayerEvent, PlayerSnapshot, SimulatedDevice};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Simulated time granularity for `tick`
const TICK_STEP: Duration = Duration::from_secs(1);

/// Whether the script should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    catalog: Catalog,
    device: SimulatedDevice,
    engine: PlaybackEngine,
    events: Vec<PlayerEvent>,
}

impl Session {
    /// Build the device from settings and wire an engine to it
    ///
    /// Catalog durations are registered with the device so simulated tracks
    /// last as long as the catalog says.
    pub fn new(settings: &PlayerSettings, catalog: Catalog) -> Self {
        let sim = &settings.simulation;
        let device = SimulatedDevice::new().with_default_duration(sim.default_track_duration());
        device.block_autoplay(sim.block_autoplay);
        for audio_ref in &sim.unavailable {
            device.mark_unavailable(audio_ref.clone());
        }
        for track in catalog.all_tracks() {
            if !track.duration.is_zero() {
                device.set_media_duration(track.audio_ref.clone(), track.duration);
            }
        }

        let engine = PlaybackEngine::new(settings.playback.clone(), device.factory());
        info!(
            "Session ready: {} tracks, {} playlists, {} albums",
            catalog.tracks.len(),
            catalog.playlists.len(),
            catalog.albums.len()
        );

        Self {
            catalog,
            device,
            engine,
            events: Vec::new(),
        }
    }

    /// Run one command, then let the device answer and apply its signals
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!("Executing {:?}", command);

        match command {
            Command::Play(None) => self.engine.play(None),
            Command::Play(Some(id)) => {
                let track = self.catalog.track(&id)?.clone();
                self.engine.play(Some(track));
            }
            Command::Pause => self.engine.pause(),
            Command::Toggle => self.engine.toggle(),
            Command::Next => self.engine.next(),
            Command::Previous => self.engine.previous(),
            Command::Seek(position) => self.engine.seek(position),
            Command::SeekPercent(fraction) => self.engine.seek_percent(fraction),
            Command::Volume(level) => self.engine.set_volume(level),
            Command::Mute => self.engine.toggle_mute(),
            Command::QueueAdd(id) => {
                let track = self.catalog.track(&id)?.clone();
                self.engine.add_to_queue(track);
            }
            Command::QueueNext(id) => {
                let track = self.catalog.track(&id)?.clone();
                self.engine.play_next(track);
            }
            Command::QueueRemove(id) => {
                if self.engine.remove_from_queue(&id).is_none() {
                    debug!("{} was not queued", id);
                }
            }
            Command::QueueClear => self.engine.clear_queue(),
            Command::QueueMove { from, to } => self.engine.reorder_queue(from, to)?,
            Command::Playlist { id, start } => {
                let tracks = self.catalog.playlist(&id)?.tracks.clone();
                self.engine.play_playlist(tracks, start)?;
            }
            Command::Album { id, start } => {
                let tracks = self.catalog.album(&id)?.tracks.clone();
                self.engine.play_playlist(tracks, start)?;
            }
            Command::Shuffle => self.engine.toggle_shuffle(),
            Command::Repeat => self.engine.toggle_repeat(),
            Command::Tick(elapsed) => self.tick(elapsed),
            Command::Status => {}
            Command::Quit => return Ok(Flow::Quit),
        }

        self.sync();
        Ok(Flow::Continue)
    }

    /// Let simulated time pass in one-second steps
    fn tick(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;
        while !remaining.is_zero() {
            let step = remaining.min(TICK_STEP);
            self.sync();
            self.device.advance(step);
            self.engine.pump();
            remaining -= step;
        }
    }

    fn sync(&mut self) {
        self.device.settle();
        self.engine.pump();
        self.events.extend(self.engine.drain_events());
    }

    /// Events collected since the last call
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn device(&self) -> &SimulatedDevice {
        &self.device
    }

    /// Stop playback and release the device
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}

/// Feed a script through the session, writing notices and status to `out`
///
/// Lines that fail to parse or to execute are reported and skipped.
pub fn run_script<R: BufRead, W: Write>(
    session: &mut Session,
    script: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    for (number, line) in script.lines().enumerate() {
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Line {}: {}", number + 1, e);
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        let flow = match session.execute(command) {
            Ok(flow) => flow,
            Err(e) => {
                report_failure(out, number + 1, &e)?;
                Flow::Continue
            }
        };

        for event in session.take_events() {
            if let Some(notice) = render::event_notice(&event) {
                writeln!(out, "{}", notice)?;
            }
        }

        if flow == Flow::Quit {
            break;
        }

        let snapshot = session.snapshot();
        if json {
            writeln!(out, "{}", render::snapshot_json(&snapshot)?)?;
        } else {
            writeln!(out, "{}", render::status_line(&snapshot))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn report_failure<W: Write>(out: &mut W, line: usize, err: &CliError) -> Result<()> {
    warn!("Line {}: {}", line, err);
    writeln!(out, "error: {}", err)?;
    Ok(())
}
