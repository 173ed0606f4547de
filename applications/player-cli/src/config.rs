/// Player configuration
use crate::error::{CliError, Result};
use melodify_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "melodify.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Behaviour of the simulated audio device
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length of tracks whose catalog entry has no duration
    #[serde(default = "default_track_secs")]
    pub default_track_secs: u64,

    /// Reject every start request, like a browser without user interaction
    #[serde(default)]
    pub block_autoplay: bool,

    /// Audio references that fail to start
    #[serde(default)]
    pub unavailable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Print JSON snapshots instead of status lines
    #[serde(default)]
    pub json: bool,
}

impl SimulationSettings {
    pub fn default_track_duration(&self) -> Duration {
        Duration::from_secs(self.default_track_secs)
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_track_secs: default_track_secs(),
            block_autoplay: false,
            unavailable: Vec::new(),
        }
    }
}

impl PlayerSettings {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `melodify.toml` in the
    /// working directory is used if present. Environment variables prefixed
    /// with `MELODIFY_` override file values, with `__` between nested keys
    /// (`MELODIFY_PLAYBACK__VOLUME=0.4`). Lists are comma separated
    /// (`MELODIFY_SIMULATION__UNAVAILABLE=a.mp3,b.mp3`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MELODIFY")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("simulation.unavailable")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 1, got {}",
                volume
            )));
        }

        if self.simulation.default_track_secs == 0 {
            return Err(CliError::Config(
                "simulation.default_track_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

// Default values
fn default_track_secs() -> u64 {
    180
}

#[cfg(test)]
mod tests {
    use super::*;
    use melodify_playback::RepeatMode;

    #[test]
    fn defaults_are_valid() {
        let settings = PlayerSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.playback.volume, 0.7);
        assert_eq!(settings.simulation.default_track_secs, 180);
        assert!(!settings.output.json);
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut settings = PlayerSettings::default();
        settings.playback.volume = 1.5;
        assert!(matches!(settings.validate(), Err(CliError::Config(_))));

        settings.playback.volume = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_zero_track_length() {
        let mut settings = PlayerSettings::default();
        settings.simulation.default_track_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn toml_output_parses_back() {
        let mut settings = PlayerSettings::default();
        settings.playback.repeat = RepeatMode::All;
        settings.simulation.unavailable = vec!["broken.mp3".to_string()];

        let text = settings.to_toml().unwrap();
        let parsed: PlayerSettings = toml::from_str(&text).unwrap();

        assert_eq!(parsed.playback.repeat, RepeatMode::All);
        assert_eq!(parsed.simulation.unavailable, vec!["broken.mp3"]);
    }
}
