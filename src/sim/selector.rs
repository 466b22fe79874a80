//! Next-fruit selection
//!
//! One tier is always rolled ahead so the preview can be shown before the
//! player needs it. Rolls are uniform over the low end of the ladder.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone)]
pub struct FruitSelector {
    highest_starting_index: usize,
    tier_count: usize,
    pending: Option<usize>,
    rng: Pcg32,
}

impl FruitSelector {
    pub fn new(seed: u64, highest_starting_index: usize, tier_count: usize) -> Self {
        let mut selector = Self {
            highest_starting_index,
            tier_count,
            pending: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        selector.pending = selector.roll();
        selector
    }

    /// Highest tier index a roll can produce
    pub fn max_index(&self) -> Option<usize> {
        if self.tier_count == 0 {
            None
        } else {
            Some(self.highest_starting_index.min(self.tier_count - 1))
        }
    }

    /// The pre-rolled tier the next spawn will use
    pub fn peek(&self) -> Option<usize> {
        self.pending
    }

    /// Hand out the pending tier and pre-roll the one after it
    pub fn take(&mut self) -> Option<usize> {
        let next = self.pending.take()?;
        self.pending = self.roll();
        Some(next)
    }

    fn roll(&mut self) -> Option<usize> {
        let max = self.max_index()?;
        Some(self.rng.random_range(0..=max))
    }
}
