//! Play queue
//!
//! Two pieces of state:
//! - Upcoming: tracks scheduled to play next, front first
//! - Original: the playlist as last submitted, kept so `repeat = all` can
//!   rebuild a full cycle after the upcoming list has been consumed
//!
//! ```text
//! Currently Playing: Track B          (owned by the engine)
//! ─────────────────────────────
//! Upcoming:
//!   - Track C
//!   - Track A
//! ─────────────────────────────
//! Original (play_playlist input):
//!   A, B, C
//! ```

use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffled;
use melodify_core::Track;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks that play next, front first
    upcoming: VecDeque<Track>,

    /// Last submitted playlist, verbatim
    original: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to the tail
    pub fn push_back(&mut self, track: Track) {
        self.upcoming.push_back(track);
    }

    /// Insert a track so it plays next
    pub fn push_front(&mut self, track: Track) {
        self.upcoming.push_front(track);
    }

    /// Remove the first upcoming entry with the given id
    pub fn remove(&mut self, track_id: &str) -> Option<Track> {
        let index = self.upcoming.iter().position(|t| t.id == track_id)?;
        self.upcoming.remove(index)
    }

    /// Move an upcoming entry from `from` to `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.upcoming.len();
        for index in [from, to] {
            if index >= len {
                return Err(PlaybackError::IndexOutOfBounds { index, len });
            }
        }
        if from != to {
            if let Some(track) = self.upcoming.remove(from) {
                self.upcoming.insert(to, track);
            }
        }
        Ok(())
    }

    /// Empty the upcoming list
    ///
    /// The original playlist survives, so `repeat = all` can still restart it.
    pub fn clear(&mut self) {
        self.upcoming.clear();
    }

    /// Take the next track off the front
    pub fn pop_next(&mut self) -> Option<Track> {
        self.upcoming.pop_front()
    }

    /// Peek at next track without removing
    pub fn peek_next(&self) -> Option<&Track> {
        self.upcoming.front()
    }

    /// Replace both the original playlist and the upcoming list
    pub fn load_playlist(&mut self, original: Vec<Track>, upcoming: Vec<Track>) {
        self.original = original;
        self.upcoming = upcoming.into();
    }

    /// Rebuild the upcoming list from the original playlist and take its head
    ///
    /// Used by `repeat = all` once the upcoming list has run dry. The copy is
    /// reshuffled when `shuffle` is set. Returns `None` when no playlist has
    /// been submitted.
    pub fn restart_cycle<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) -> Option<Track> {
        if self.original.is_empty() {
            return None;
        }

        let order = if shuffle {
            shuffled(&self.original, rng)
        } else {
            self.original.clone()
        };

        self.upcoming = order.into();
        self.upcoming.pop_front()
    }

    /// Upcoming tracks in play order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.upcoming.iter()
    }

    /// Owned copy of the upcoming tracks
    pub fn to_vec(&self) -> Vec<Track> {
        self.upcoming.iter().cloned().collect()
    }

    /// Last submitted playlist
    pub fn original(&self) -> &[Track] {
        &self.original
    }

    /// Number of upcoming tracks
    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    /// Check if nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist")
    }

    fn ids(queue: &Queue) -> Vec<String> {
        queue.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.original().is_empty());
    }

    #[test]
    fn fifo_order() {
        let mut queue = Queue::new();
        queue.push_back(create_test_track("a"));
        queue.push_back(create_test_track("b"));

        assert_eq!(queue.pop_next().unwrap().id, "a");
        assert_eq!(queue.peek_next().unwrap().id, "b");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn push_front_plays_next() {
        let mut queue = Queue::new();
        queue.push_back(create_test_track("a"));
        queue.push_front(create_test_track("b"));

        assert_eq!(ids(&queue), vec!["b", "a"]);
    }

    #[test]
    fn remove_only_first_match() {
        let mut queue = Queue::new();
        queue.push_back(create_test_track("a"));
        queue.push_back(create_test_track("b"));
        queue.push_back(create_test_track("a"));

        let removed = queue.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(ids(&queue), vec!["b", "a"]);

        assert!(queue.remove("zzz").is_none());
    }

    #[test]
    fn reorder_moves_entry() {
        let mut queue = Queue::new();
        for id in ["1", "2", "3"] {
            queue.push_back(create_test_track(id));
        }

        queue.reorder(0, 2).unwrap();
        assert_eq!(ids(&queue), vec!["2", "3", "1"]);

        assert_eq!(
            queue.reorder(0, 3),
            Err(PlaybackError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn clear_keeps_original() {
        let mut queue = Queue::new();
        let playlist = vec![create_test_track("1"), create_test_track("2")];
        queue.load_playlist(playlist.clone(), playlist[1..].to_vec());

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.original().len(), 2);
    }

    #[test]
    fn restart_cycle_rebuilds_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = Queue::new();
        let playlist = vec![
            create_test_track("1"),
            create_test_track("2"),
            create_test_track("3"),
        ];
        queue.load_playlist(playlist, Vec::new());

        let head = queue.restart_cycle(false, &mut rng).unwrap();
        assert_eq!(head.id, "1");
        assert_eq!(ids(&queue), vec!["2", "3"]);
    }

    #[test]
    fn restart_cycle_shuffled_is_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = Queue::new();
        let playlist: Vec<Track> = (0..6).map(|i| create_test_track(&i.to_string())).collect();
        queue.load_playlist(playlist, Vec::new());

        let head = queue.restart_cycle(true, &mut rng).unwrap();
        let mut all = ids(&queue);
        all.push(head.id);
        all.sort();
        assert_eq!(all, vec!["0", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn restart_cycle_without_playlist() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = Queue::new();
        queue.push_back(create_test_track("x"));
        queue.pop_next();

        assert!(queue.restart_cycle(false, &mut rng).is_none());
    }
}
