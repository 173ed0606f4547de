//! Environment overrides
//!
//! Kept in its own test binary: environment variables are process-wide.

use melodify_player::PlayerSettings;
use melodify_playback::RepeatMode;
use std::io::Write;

#[test]
fn environment_overrides_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(file, "[playback]\nvolume = 0.9\nrepeat = \"all\"").unwrap();
    file.flush().unwrap();

    std::env::set_var("MELODIFY_PLAYBACK__VOLUME", "0.25");
    std::env::set_var("MELODIFY_SIMULATION__BLOCK_AUTOPLAY", "true");
    std::env::set_var("MELODIFY_SIMULATION__UNAVAILABLE", "gone.mp3,broken.mp3");
    let settings = PlayerSettings::load(Some(file.path()));
    std::env::remove_var("MELODIFY_PLAYBACK__VOLUME");
    std::env::remove_var("MELODIFY_SIMULATION__BLOCK_AUTOPLAY");
    std::env::remove_var("MELODIFY_SIMULATION__UNAVAILABLE");

    let settings = settings.unwrap();
    assert_eq!(settings.playback.volume, 0.25);
    assert_eq!(settings.playback.repeat, RepeatMode::All);
    assert!(settings.simulation.block_autoplay);
    assert_eq!(
        settings.simulation.unavailable,
        vec!["gone.mp3", "broken.mp3"]
    );
}
