//! Melodify Player - script-driven front end
//!
//! Loads a catalog, wires a [`melodify_playback::PlaybackEngine`] to a
//! simulated audio device, and runs player commands from a script.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use command::Command;
pub use config::PlayerSettings;
pub use error::{CliError, Result};
pub use session::{run_script, Flow, Session};
