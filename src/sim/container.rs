//! Play container
//!
//! Exclusive owner of every live fruit. Stored by id so iteration order is
//! stable and a destroyed fruit's id simply stops resolving.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity assigned at creation, totally ordered by allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FruitId(pub u32);

impl std::fmt::Display for FruitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live, physically simulated fruit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitInstance {
    pub id: FruitId,
    pub tier: usize,
    /// Last position reported by the engine
    pub pos: Vec2,
    /// Spawned by a merge; never produces a landing
    pub from_merge: bool,
    /// First contact already handled
    pub landed: bool,
}

impl FruitInstance {
    pub fn thrown(id: FruitId, tier: usize, pos: Vec2) -> Self {
        Self {
            id,
            tier,
            pos,
            from_merge: false,
            landed: false,
        }
    }

    pub fn merged(id: FruitId, tier: usize, pos: Vec2) -> Self {
        Self {
            id,
            tier,
            pos,
            from_merge: true,
            landed: false,
        }
    }

    /// Whether the next contact on this fruit counts as its landing
    pub fn awaiting_landing(&self) -> bool {
        !self.from_merge && !self.landed
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayContainer {
    fruits: BTreeMap<FruitId, FruitInstance>,
}

impl PlayContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fruit: FruitInstance) {
        self.fruits.insert(fruit.id, fruit);
    }

    pub fn remove(&mut self, id: FruitId) -> Option<FruitInstance> {
        self.fruits.remove(&id)
    }

    pub fn get(&self, id: FruitId) -> Option<&FruitInstance> {
        self.fruits.get(&id)
    }

    pub fn get_mut(&mut self, id: FruitId) -> Option<&mut FruitInstance> {
        self.fruits.get_mut(&id)
    }

    pub fn contains(&self, id: FruitId) -> bool {
        self.fruits.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    /// Live fruits in id order
    pub fn iter(&self) -> impl Iterator<Item = &FruitInstance> {
        self.fruits.values()
    }

    /// Distinct tiers currently present, ascending
    pub fn present_tiers(&self) -> Vec<usize> {
        self.fruits
            .values()
            .map(|f| f.tier)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn count_of_tier(&self, tier: usize) -> usize {
        self.fruits.values().filter(|f| f.tier == tier).count()
    }
}
