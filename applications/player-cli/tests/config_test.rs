//! Configuration file loading

use melodify_player::{CliError, PlayerSettings};
use melodify_playback::{QueueEndBehavior, RepeatMode};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_all_sections() {
    let file = write_config(
        r#"
[playback]
volume = 0.5
shuffle = true
repeat = "one"
on_queue_end = "pause"
shuffle_seed = 42

[simulation]
default_track_secs = 30
block_autoplay = true
unavailable = ["missing.mp3"]

[output]
json = true
"#,
    );

    let settings = PlayerSettings::load(Some(file.path())).unwrap();

    assert_eq!(settings.playback.volume, 0.5);
    assert!(settings.playback.shuffle);
    assert_eq!(settings.playback.repeat, RepeatMode::One);
    assert_eq!(settings.playback.on_queue_end, QueueEndBehavior::Pause);
    assert_eq!(settings.playback.shuffle_seed, Some(42));
    assert_eq!(settings.simulation.default_track_secs, 30);
    assert!(settings.simulation.block_autoplay);
    assert_eq!(settings.simulation.unavailable, vec!["missing.mp3"]);
    assert!(settings.output.json);
}

#[test]
fn missing_sections_use_defaults() {
    let file = write_config("[playback]\nrepeat = \"all\"\n");

    let settings = PlayerSettings::load(Some(file.path())).unwrap();

    assert_eq!(settings.playback.repeat, RepeatMode::All);
    assert_eq!(settings.playback.volume, 0.7);
    assert_eq!(settings.simulation.default_track_secs, 180);
    assert!(!settings.output.json);
    assert!(settings.validate().is_ok());
}

#[test]
fn out_of_range_volume_fails_validation() {
    let file = write_config("[playback]\nvolume = 3.0\n");

    let settings = PlayerSettings::load(Some(file.path())).unwrap();

    assert!(matches!(settings.validate(), Err(CliError::Config(_))));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    let err = PlayerSettings::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn malformed_file_is_a_config_error() {
    let file = write_config("[playback\nvolume = ");

    assert!(matches!(
        PlayerSettings::load(Some(file.path())),
        Err(CliError::Config(_))
    ));
}
