//! Shuffle for playlist randomization
//!
//! Pure random permutation (Fisher-Yates): every ordering of the input is
//! equally likely.

use melodify_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle tracks in place
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Shuffled copy of `tracks`, leaving the input untouched
pub fn shuffled<R: Rng + ?Sized>(tracks: &[Track], rng: &mut R) -> Vec<Track> {
    let mut copy = tracks.to_vec();
    shuffle_tracks(&mut copy, rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(i.to_string(), format!("Track {i}"), "Artist"))
            .collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = tracks(10);
        let output = shuffled(&input, &mut rng);

        let ids: HashSet<&str> = output.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(output.len(), 10);
    }

    #[test]
    fn shuffled_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = tracks(5);
        let before = input.clone();
        let _ = shuffled(&input, &mut rng);
        assert_eq!(input, before);
    }

    #[test]
    fn same_seed_same_order() {
        let input = tracks(8);
        let a = shuffled(&input, &mut StdRng::seed_from_u64(42));
        let b = shuffled(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_permutation_of_three_shows_up() {
        // 6 permutations; with 6000 draws each should land near 1000.
        let mut rng = StdRng::seed_from_u64(1234);
        let input = tracks(3);
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..6000 {
            let order: String = shuffled(&input, &mut rng)
                .iter()
                .map(|t| t.id.as_str())
                .collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (order, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "permutation {order} drawn {count} times"
            );
        }
    }

    #[test]
    fn empty_and_single_are_fine() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shuffled(&[], &mut rng).is_empty());
        let one = tracks(1);
        assert_eq!(shuffled(&one, &mut rng), one);
    }
}
