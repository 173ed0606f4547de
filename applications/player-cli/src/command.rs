//! Script commands
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.

use crate::error::{CliError, Result};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play a catalog track, or resume when no id is given
    Play(Option<String>),
    Pause,
    Toggle,
    Next,
    Previous,
    Seek(Duration),
    /// Fraction of the track, `0.0..=1.0`
    SeekPercent(f32),
    Volume(f32),
    Mute,
    QueueAdd(String),
    QueueNext(String),
    QueueRemove(String),
    QueueClear,
    QueueMove { from: usize, to: usize },
    Playlist { id: String, start: usize },
    Album { id: String, start: usize },
    Shuffle,
    Repeat,
    /// Let simulated time pass
    Tick(Duration),
    Status,
    Quit,
}

impl Command {
    /// Parse one script line
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let arg = |i: usize| word(&words, i, line);

        let command = match words[0] {
            "play" => Command::Play(words.get(1).map(|s| s.to_string())),
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "seek" => {
                let target = arg(1)?;
                match target.strip_suffix('%') {
                    Some(pct) => Command::SeekPercent(parse_number(line, pct)? / 100.0),
                    None => Command::Seek(parse_secs(line, target)?),
                }
            }
            "volume" => Command::Volume(parse_number(line, arg(1)?)?),
            "mute" => Command::Mute,
            "queue" => match arg(1)? {
                "add" => Command::QueueAdd(arg(2)?.to_string()),
                "next" => Command::QueueNext(arg(2)?.to_string()),
                "rm" | "remove" => Command::QueueRemove(arg(2)?.to_string()),
                "clear" => Command::QueueClear,
                "move" => Command::QueueMove {
                    from: parse_index(line, arg(2)?)?,
                    to: parse_index(line, arg(3)?)?,
                },
                other => {
                    return Err(CliError::command(
                        line,
                        format!("unknown queue action '{}'", other),
                    ))
                }
            },
            "playlist" => Command::Playlist {
                id: arg(1)?.to_string(),
                start: parse_start(line, words.get(2))?,
            },
            "album" => Command::Album {
                id: arg(1)?.to_string(),
                start: parse_start(line, words.get(2))?,
            },
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "tick" => Command::Tick(parse_secs(line, arg(1)?)?),
            "status" => Command::Status,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(CliError::command(
                    line,
                    format!("unknown command '{}'", other),
                ))
            }
        };

        Ok(Some(command))
    }
}

fn word<'a>(words: &[&'a str], index: usize, line: &str) -> Result<&'a str> {
    words
        .get(index)
        .copied()
        .ok_or_else(|| CliError::command(line, "missing argument"))
}

fn parse_number(line: &str, text: &str) -> Result<f32> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::command(line, format!("'{}' is not a number", text)))
}

fn parse_secs(line: &str, text: &str) -> Result<Duration> {
    text.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            CliError::command(
                line,
                format!("'{}' is not a non-negative number of seconds", text),
            )
        })
}

fn parse_index(line: &str, text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| CliError::command(line, format!("'{}' is not an index", text)))
}

fn parse_start(line: &str, text: Option<&&str>) -> Result<usize> {
    text.map_or(Ok(0), |t| parse_index(line, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# warm up").unwrap(), None);
    }

    #[test]
    fn play_with_and_without_id() {
        assert_eq!(parse("play"), Command::Play(None));
        assert_eq!(parse("play t1"), Command::Play(Some("t1".to_string())));
    }

    #[test]
    fn seek_seconds_and_percent() {
        assert_eq!(parse("seek 42"), Command::Seek(Duration::from_secs(42)));
        assert_eq!(parse("seek 1.5"), Command::Seek(Duration::from_millis(1500)));
        assert_eq!(parse("seek 50%"), Command::SeekPercent(0.5));
        assert!(Command::parse("seek -3").is_err());
        assert!(Command::parse("seek").is_err());
    }

    #[test]
    fn queue_actions() {
        assert_eq!(parse("queue add t2"), Command::QueueAdd("t2".to_string()));
        assert_eq!(parse("queue next t3"), Command::QueueNext("t3".to_string()));
        assert_eq!(parse("queue rm t2"), Command::QueueRemove("t2".to_string()));
        assert_eq!(parse("queue clear"), Command::QueueClear);
        assert_eq!(
            parse("queue move 2 0"),
            Command::QueueMove { from: 2, to: 0 }
        );
        assert!(Command::parse("queue shuffle").is_err());
        assert!(Command::parse("queue move 1").is_err());
    }

    #[test]
    fn playlist_start_defaults_to_zero() {
        assert_eq!(
            parse("playlist p1"),
            Command::Playlist {
                id: "p1".to_string(),
                start: 0
            }
        );
        assert_eq!(
            parse("album a1 3"),
            Command::Album {
                id: "a1".to_string(),
                start: 3
            }
        );
    }

    #[test]
    fn volume_must_be_a_number() {
        assert_eq!(parse("volume 0.4"), Command::Volume(0.4));
        assert!(Command::parse("volume loud").is_err());
        assert!(Command::parse("volume NaN").is_err());
    }

    #[test]
    fn unknown_command_is_error() {
        let err = Command::parse("dance").unwrap_err();
        assert!(err.to_string().contains("unknown command 'dance'"));
    }
}
