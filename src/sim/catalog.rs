//! Fruit ladder
//!
//! Tiers are loaded once at startup and never mutated.

use serde::{Deserialize, Serialize};

use crate::settings::FruitTierSettings;

/// One immutable rung of the ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitTier {
    pub index: usize,
    /// Engine-side template name
    pub template: String,
    /// Coins awarded when two of this tier merge
    pub score_value: u64,
    /// Collider radius (world units)
    pub radius: f32,
}

/// Ordered list of fruit tiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FruitCatalog {
    tiers: Vec<FruitTier>,
}

impl FruitCatalog {
    pub fn new(tiers: &[FruitTierSettings]) -> Self {
        let tiers = tiers
            .iter()
            .enumerate()
            .map(|(index, t)| FruitTier {
                index,
                template: t.template.clone(),
                score_value: t.score_value,
                radius: t.radius,
            })
            .collect();
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FruitTier> {
        self.tiers.get(index)
    }

    pub fn tiers(&self) -> &[FruitTier] {
        &self.tiers
    }

    /// Tier produced by merging two of `index`, wrapping after the last.
    ///
    /// `None` for an empty catalog.
    pub fn next_tier(&self, index: usize) -> Option<usize> {
        if self.tiers.is_empty() {
            return None;
        }
        Some((index + 1) % self.tiers.len())
    }
}
