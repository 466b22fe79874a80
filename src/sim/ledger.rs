//! Coin ledger
//!
//! The total never goes negative. Every successful mutation returns a
//! [`CoinChange`]; the caller fans it out to observers before returning.

use serde::{Deserialize, Serialize};

/// A completed change to the coin total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChange {
    pub previous: u64,
    pub total: u64,
}

impl CoinChange {
    /// Coins gained by this change (0 for a spend)
    pub fn earned(&self) -> u64 {
        self.total.saturating_sub(self.previous)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinLedger {
    total: u64,
}

impl CoinLedger {
    pub fn new(starting: u64) -> Self {
        Self { total: starting }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Add coins. Earning nothing is not a change.
    pub fn earn(&mut self, amount: u64) -> Option<CoinChange> {
        if amount == 0 {
            return None;
        }
        let previous = self.total;
        self.total = self.total.saturating_add(amount);
        Some(CoinChange {
            previous,
            total: self.total,
        })
    }

    /// Remove coins if the balance covers them; otherwise nothing changes.
    pub fn try_spend(&mut self, amount: u64) -> Option<CoinChange> {
        if amount == 0 || amount > self.total {
            return None;
        }
        let previous = self.total;
        self.total -= amount;
        Some(CoinChange {
            previous,
            total: self.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_earn_then_spend() {
        let mut ledger = CoinLedger::new(0);
        let change = ledger.earn(7).unwrap();
        assert_eq!(change, CoinChange { previous: 0, total: 7 });
        assert_eq!(change.earned(), 7);

        let change = ledger.try_spend(5).unwrap();
        assert_eq!(change.total, 2);
        assert_eq!(change.earned(), 0);
    }

    #[test]
    fn test_overspend_refused() {
        let mut ledger = CoinLedger::new(3);
        assert!(ledger.try_spend(4).is_none());
        assert_eq!(ledger.total(), 3);
        assert!(ledger.try_spend(3).is_some());
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_zero_amounts_are_not_changes() {
        let mut ledger = CoinLedger::new(3);
        assert!(ledger.earn(0).is_none());
        assert!(ledger.try_spend(0).is_none());
        assert_eq!(ledger.total(), 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Earn(u64),
        Spend(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u64..1_000).prop_map(Op::Earn),
            (0u64..1_500).prop_map(Op::Spend),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_matches_successful_ops(ops in proptest::collection::vec(op(), 0..64)) {
            let mut ledger = CoinLedger::new(0);
            let mut expected: i128 = 0;
            for op in ops {
                match op {
                    Op::Earn(d) => {
                        if ledger.earn(d).is_some() {
                            expected += d as i128;
                        }
                    }
                    Op::Spend(d) => {
                        let before = ledger.total();
                        match ledger.try_spend(d) {
                            Some(_) => expected -= d as i128,
                            None => prop_assert_eq!(ledger.total(), before),
                        }
                    }
                }
                prop_assert!(expected >= 0);
                prop_assert_eq!(ledger.total() as i128, expected);
            }
        }

        #[test]
        fn prop_overspend_never_mutates(start in 0u64..1_000, extra in 1u64..1_000) {
            let mut ledger = CoinLedger::new(start);
            prop_assert!(ledger.try_spend(start + extra).is_none());
            prop_assert_eq!(ledger.total(), start);
        }
    }
}
