//! Text and JSON rendering of player state
//!
//! Mirrors what the player bar shows: transport state, the current track,
//! elapsed and total time, volume, and the shuffle/repeat toggles.

use crate::error::Result;
use melodify_core::{format_time, Catalog, Track};
use melodify_playback::{PlaybackState, PlayerEvent, PlayerSnapshot, RepeatMode};
use std::fmt::Write;

/// One-line status, e.g.
/// `[playing] Midnight Drive - Neon Waves  1:02 / 3:54  vol 70%  shuffle off  repeat all  queue 3`
pub fn status_line(snapshot: &PlayerSnapshot) -> String {
    let state = match snapshot.state {
        PlaybackState::Idle => "idle",
        PlaybackState::Paused => "paused",
        PlaybackState::Playing => "playing",
    };

    let now_playing = match &snapshot.current_track {
        Some(track) => format!(
            "{} - {}  {} / {}",
            track.title,
            track.artist,
            format_time(snapshot.position),
            format_time(snapshot.duration)
        ),
        None => "nothing loaded".to_string(),
    };

    let volume = if snapshot.muted {
        "muted".to_string()
    } else {
        format!("{}%", (snapshot.volume * 100.0).round() as u32)
    };

    format!(
        "[{}] {}  vol {}  shuffle {}  repeat {}  queue {}",
        state,
        now_playing,
        volume,
        if snapshot.shuffle { "on" } else { "off" },
        repeat_label(snapshot.repeat),
        snapshot.queue.len()
    )
}

/// Snapshot as a single JSON line
pub fn snapshot_json(snapshot: &PlayerSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Event worth telling the user about, if any
///
/// Position updates and the like are too chatty for the status stream and
/// only go to the debug log.
pub fn event_notice(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::PlaybackFailed { track_id, message } => {
            Some(format!("! could not play {}: {}", track_id, message))
        }
        PlayerEvent::TrackEnded { track_id } => Some(format!("- finished {}", track_id)),
        _ => None,
    }
}

/// Catalog listing, or search matches when `query` is given
pub fn catalog_listing(catalog: &Catalog, query: Option<&str>) -> String {
    let mut out = String::new();

    match query {
        Some(query) => match catalog.search(query) {
            None => out.push_str("Enter a search term\n"),
            Some(results) if results.is_empty() => {
                let _ = writeln!(out, "No results for \"{}\"", query.trim());
            }
            Some(results) => {
                section(&mut out, "Songs", results.tracks.iter().map(|t| track_row(t)));
                section(
                    &mut out,
                    "Artists",
                    results.artists.iter().map(|a| format!("{}  {}", a.id, a.name)),
                );
                section(
                    &mut out,
                    "Playlists",
                    results
                        .playlists
                        .iter()
                        .map(|p| format!("{}  {} ({} tracks)", p.id, p.name, p.tracks.len())),
                );
            }
        },
        None => {
            section(&mut out, "Tracks", catalog.tracks.iter().map(track_row));
            section(
                &mut out,
                "Playlists",
                catalog.playlists.iter().map(|p| {
                    format!(
                        "{}  {} ({} tracks, {})",
                        p.id,
                        p.name,
                        p.tracks.len(),
                        format_time(p.total_duration())
                    )
                }),
            );
            section(
                &mut out,
                "Albums",
                catalog
                    .albums
                    .iter()
                    .map(|a| format!("{}  {} - {} ({} tracks)", a.id, a.name, a.artist, a.tracks.len())),
            );
        }
    }

    out
}

fn section(out: &mut String, title: &str, rows: impl Iterator<Item = String>) {
    let rows: Vec<String> = rows.collect();
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for row in rows {
        let _ = writeln!(out, "  {}", row);
    }
}

fn track_row(track: &Track) -> String {
    format!(
        "{}  {} - {}  {}",
        track.id,
        track.title,
        track.artist,
        format_time(track.duration)
    )
}

fn repeat_label(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    }
}
