//! Contact handling: landings and merges
//!
//! The engine reports a contact once per participant, so a fruit pair
//! usually arrives twice. Only the side with the greater id performs the
//! merge, which makes the pair merge exactly once without any locking.

use glam::Vec2;

use super::container::{FruitId, FruitInstance};
use super::state::{GameEvent, GameState};
use super::throw;
use super::timer::TimerKind;
use crate::midpoint;

/// What the reporting fruit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTarget {
    Fruit(FruitId),
    /// Floor, walls, anything that is not a fruit
    Static,
}

/// Result of a completed merge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    /// Higher-id participant (drove the merge)
    pub survivor: FruitId,
    pub absorbed: FruitId,
    pub tier: usize,
    pub merged_id: FruitId,
    pub merged_tier: usize,
    pub pos: Vec2,
    pub coins: u64,
}

/// Contact callback for fruit `this`.
///
/// The first contact of a thrown fruit is its landing; a contact with a live
/// fruit of the same tier may also merge the pair.
pub fn on_contact(
    state: &mut GameState,
    this: FruitId,
    other: ContactTarget,
) -> Option<MergeOutcome> {
    if !state.is_playing() {
        return None;
    }
    let fruit = state.container.get_mut(this)?;
    if fruit.awaiting_landing() {
        fruit.landed = true;
        log::debug!("Fruit {} landed", this);
        state.emit(GameEvent::FruitLanded { id: this });
        throw::on_landed(state, this);
    }

    match other {
        ContactTarget::Fruit(other) => resolve_merge(state, this, other),
        ContactTarget::Static => None,
    }
}

/// Merge `this` with `other` if they are live, same-tier, and `this` has
/// the greater id. Every other case is a no-op.
pub fn resolve_merge(state: &mut GameState, this: FruitId, other: FruitId) -> Option<MergeOutcome> {
    if this <= other {
        return None;
    }
    let a = state.container.get(this)?;
    let b = state.container.get(other)?;
    if a.tier != b.tier {
        return None;
    }
    let tier = a.tier;
    let pos = midpoint(a.pos, b.pos);

    let merged_tier = state.catalog.next_tier(tier)?;
    let coins = state.catalog.get(tier)?.score_value;
    let merged_id = state.next_entity_id()?;

    state.earn_coins(coins);
    state
        .container
        .insert(FruitInstance::merged(merged_id, merged_tier, pos));

    let outcome = MergeOutcome {
        survivor: this,
        absorbed: other,
        tier,
        merged_id,
        merged_tier,
        pos,
        coins,
    };
    log::debug!(
        "Merged {} + {} (tier {}) into {} (tier {}), +{} coins",
        this,
        other,
        tier,
        merged_id,
        merged_tier,
        coins
    );
    state.emit(GameEvent::FruitMerged {
        survivor: this,
        absorbed: other,
        tier,
        merged_id,
        merged_tier,
        pos,
        coins,
    });
    let cue = state.settings.merge_cue_seconds;
    state.timers.schedule(TimerKind::MergeCue, cue);

    state.destroy_fruit(other);
    state.destroy_fruit(this);

    Some(outcome)
}
