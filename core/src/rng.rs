//! Deterministic shuffling for the synergy deck
//!
//! The only randomness in a match is the initial deck order, derived from the
//! match seed so that a seed and an intent list always replay identically.

use alloc::vec::Vec;

use crate::types::SynergyCard;

/// SplitMix64 generator; small, fast and seedable with any value.
#[derive(Debug, Clone)]
pub struct DeckRng {
    state: u64,
}

impl DeckRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-enough value in `[0, max)`; 0 when `max` is 0.
    pub fn below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// The catalog deck shuffled for a match seed.
pub fn shuffled_deck(cards: &[SynergyCard], seed: u64) -> Vec<SynergyCard> {
    let mut deck = cards.to_vec();
    DeckRng::from_seed(seed).shuffle(&mut deck);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SynergyId, SynergyType};

    fn deck(n: u32) -> Vec<SynergyCard> {
        (1..=n)
            .map(|i| SynergyCard::new(SynergyId(i), "Card", SynergyType::Attack, 1))
            .collect()
    }

    #[test]
    fn test_same_seed_same_order() {
        let cards = deck(20);
        assert_eq!(shuffled_deck(&cards, 7), shuffled_deck(&cards, 7));
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let cards = deck(20);
        let mut ids: Vec<u32> = shuffled_deck(&cards, 99).iter().map(|c| c.id.0).collect();
        ids.sort();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_different_seeds_differ() {
        let cards = deck(20);
        assert_ne!(shuffled_deck(&cards, 1), shuffled_deck(&cards, 2));
    }

    #[test]
    fn test_below_zero_is_zero() {
        let mut rng = DeckRng::from_seed(3);
        assert_eq!(rng.below(0), 0);
        for _ in 0..50 {
            assert!(rng.below(6) < 6);
        }
    }
}
