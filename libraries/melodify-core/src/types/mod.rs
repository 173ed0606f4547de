mod album;
mod artist;
mod playlist;
mod track;

pub use album::Album;
pub use artist::Artist;
pub use playlist::Playlist;
pub use track::{duration_secs, Track};
