//! Fisher–Yates shuffle with an injectable random source.
//!
//! The home feed shuffles its first page for variety. The source is
//! injectable so tests can assert a deterministic permutation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source selection for the presentational first-page shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    Off,
    Entropy,
    Seeded(u64),
}

/// In-place Fisher–Yates over the supplied source.
pub fn shuffle_in_place<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

pub(crate) fn rng_for(mode: ShuffleMode) -> Option<StdRng> {
    match mode {
        ShuffleMode::Off => None,
        ShuffleMode::Entropy => Some(StdRng::from_entropy()),
        ShuffleMode::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let mut first: Vec<u32> = (0..16).collect();
        let mut second: Vec<u32> = (0..16).collect();
        shuffle_in_place(&mut first, &mut StdRng::seed_from_u64(7));
        shuffle_in_place(&mut second, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let mut items: Vec<u32> = (0..16).collect();
        shuffle_in_place(&mut items, &mut StdRng::seed_from_u64(42));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u32>>());
    }

    #[test]
    fn empty_and_single_slices_are_untouched() {
        let mut empty: Vec<u32> = Vec::new();
        shuffle_in_place(&mut empty, &mut StdRng::seed_from_u64(1));
        assert!(empty.is_empty());

        let mut single = vec![9];
        shuffle_in_place(&mut single, &mut StdRng::seed_from_u64(1));
        assert_eq!(single, [9]);
    }
}
