//! Throw state machine
//!
//! `Idle` → `spawn_next` → `Holding` → `commit_throw` → `InFlight` →
//! first landing → `Idle` → `spawn_next` ...
//!
//! Throw requests outside `Holding` are dropped, never queued.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::container::{FruitId, FruitInstance};
use super::state::{GameEvent, GameState};

/// The fruit waiting at the throw origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeldFruit {
    pub id: FruitId,
    pub tier: usize,
    /// Collider radius, drives the player boundary
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ThrowPhase {
    /// Nothing held (transient, or permanently with an empty catalog)
    #[default]
    Idle,
    /// A fruit is staged and may be thrown
    Holding(HeldFruit),
    /// Released; waiting for its first contact
    InFlight(FruitId),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrowController {
    phase: ThrowPhase,
}

impl ThrowController {
    pub fn phase(&self) -> ThrowPhase {
        self.phase
    }

    pub fn can_throw(&self) -> bool {
        matches!(self.phase, ThrowPhase::Holding(_))
    }

    pub fn held(&self) -> Option<HeldFruit> {
        match self.phase {
            ThrowPhase::Holding(held) => Some(held),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> Option<FruitId> {
        match self.phase {
            ThrowPhase::InFlight(id) => Some(id),
            _ => None,
        }
    }
}

/// Stage the selector's next fruit at the throw origin.
///
/// Only valid from `Idle`; returns the held fruit's id.
pub fn spawn_next(state: &mut GameState) -> Option<FruitId> {
    if state.thrower.phase != ThrowPhase::Idle {
        return None;
    }
    let tier = state.selector.peek()?;
    let radius = state.catalog.get(tier)?.radius;
    let id = state.next_entity_id()?;
    state.selector.take();

    state.thrower.phase = ThrowPhase::Holding(HeldFruit { id, tier, radius });
    state
        .player
        .change_boundary(radius, state.settings.edge_padding);

    log::debug!("Holding fruit {} (tier {})", id, tier);
    state.emit(GameEvent::FruitSpawned { id, tier });
    Some(id)
}

/// Release the held fruit into the container.
///
/// Returns false (and changes nothing) unless a fruit is held.
pub fn commit_throw(state: &mut GameState) -> bool {
    if !state.is_playing() {
        return false;
    }
    let ThrowPhase::Holding(held) = state.thrower.phase else {
        return false;
    };

    let pos = Vec2::new(state.player.x, state.settings.drop_height);
    state
        .container
        .insert(FruitInstance::thrown(held.id, held.tier, pos));
    state.thrower.phase = ThrowPhase::InFlight(held.id);
    state.has_placed_fruit = true;

    log::debug!("Threw fruit {} (tier {}) at x={:.2}", held.id, held.tier, pos.x);
    state.emit(GameEvent::FruitThrown {
        id: held.id,
        tier: held.tier,
        pos,
    });
    true
}

/// The in-flight fruit has landed (or was destroyed first): allow the next
/// throw and stage a new fruit.
pub fn on_landed(state: &mut GameState, id: FruitId) {
    if state.thrower.in_flight() != Some(id) {
        return;
    }
    state.thrower.phase = ThrowPhase::Idle;
    if state.is_playing() {
        spawn_next(state);
    }
}
