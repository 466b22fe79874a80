//! Elimination spin pricing
//!
//! The price is a function of cumulative earnings only: every
//! `step` coins earned doubles it. Spending never lowers the price.

use serde::{Deserialize, Serialize};

use super::ledger::CoinChange;
use crate::consts::{DEFAULT_COINS_PER_DOUBLE_STEP, DEFAULT_SPIN_PRICE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinPriceModel {
    price: u64,
    earned_since_last_double: u64,
    step: u64,
}

impl Default for SpinPriceModel {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_PRICE, DEFAULT_COINS_PER_DOUBLE_STEP)
    }
}

impl SpinPriceModel {
    /// A non-positive step falls back to the default, a zero price to 1.
    pub fn new(initial_price: u64, step: i64) -> Self {
        let step = if step <= 0 {
            DEFAULT_COINS_PER_DOUBLE_STEP
        } else {
            step
        };
        Self {
            price: initial_price.max(1),
            earned_since_last_double: 0,
            step: step as u64,
        }
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn earned_since_last_double(&self) -> u64 {
        self.earned_since_last_double
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Feed a ledger change. Returns true if the price moved.
    pub fn observe(&mut self, change: CoinChange) -> bool {
        self.add_earnings(change.earned())
    }

    /// Accumulate `earned` coins, doubling once per full step crossed
    pub fn add_earnings(&mut self, earned: u64) -> bool {
        if earned == 0 {
            return false;
        }
        let before = self.price;
        self.earned_since_last_double = self.earned_since_last_double.saturating_add(earned);
        let doublings = self.earned_since_last_double / self.step;
        self.earned_since_last_double %= self.step;
        self.price = if doublings >= u64::BITS as u64 {
            u64::MAX
        } else {
            self.price.saturating_mul(1u64 << doublings)
        };
        self.price != before
    }
}
