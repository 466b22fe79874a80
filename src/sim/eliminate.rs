//! Spend-to-eliminate
//!
//! Two steps: `request_elimination` lists the tiers on the board with the
//! current price, `confirm_elimination` pays and clears the chosen tier. The
//! price is read again at confirm time, so a merge in between is honoured.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{GameEvent, GameState};
use super::timer::TimerKind;

/// What the picker should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationOffer {
    /// Tiers present in the container, ascending. Empty means cancel-only.
    pub tiers: Vec<usize>,
    pub price: u64,
}

/// A paid elimination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub tier: usize,
    pub destroyed: usize,
    pub price: u64,
    /// Coins left after paying
    pub total: u64,
}

/// Why an elimination was refused. Nothing is spent or destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EliminationError {
    #[error("not enough coins: price {price}, total {total}")]
    InsufficientCoins { price: u64, total: u64 },
    #[error("tier {0} is not in the catalog")]
    UnknownTier(usize),
    #[error("the run is over")]
    RunOver,
}

/// Distinct tiers of every live fruit, ascending
pub fn present_tiers(state: &GameState) -> Vec<usize> {
    state.container.present_tiers()
}

/// Open the picker
pub fn request_elimination(state: &mut GameState) -> EliminationOffer {
    let offer = EliminationOffer {
        tiers: present_tiers(state),
        price: state.price.price(),
    };
    log::debug!(
        "Elimination requested: tiers {:?}, price {}, total {}",
        offer.tiers,
        offer.price,
        state.ledger.total()
    );
    state.emit(GameEvent::EliminationRequested {
        tiers: offer.tiers.clone(),
        price: offer.price,
    });
    offer
}

/// Pay the live price and destroy every fruit of `tier`
pub fn confirm_elimination(
    state: &mut GameState,
    tier: usize,
) -> Result<Elimination, EliminationError> {
    if !state.is_playing() {
        return Err(EliminationError::RunOver);
    }
    if state.catalog.get(tier).is_none() {
        return Err(EliminationError::UnknownTier(tier));
    }

    let price = state.price.price();
    let Some(change) = state.try_spend_coins(price) else {
        let total = state.ledger.total();
        log::info!("Not enough coins to eliminate: price {}, total {}", price, total);
        return Err(EliminationError::InsufficientCoins { price, total });
    };

    let ids: Vec<_> = state
        .container
        .iter()
        .filter(|f| f.tier == tier)
        .map(|f| f.id)
        .collect();
    let destroyed = ids
        .into_iter()
        .filter(|id| state.destroy_fruit(*id).is_some())
        .count();

    log::info!(
        "Paid {} coins (total now {}), eliminated {} fruits of tier {}",
        price,
        change.total,
        destroyed,
        tier
    );
    state.emit(GameEvent::FruitsEliminated {
        tier,
        count: destroyed,
        price,
    });
    let spin = state.settings.knob_spin_seconds;
    state.timers.schedule(TimerKind::KnobSpin, spin);

    Ok(Elimination {
        tier,
        destroyed,
        price,
        total: change.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::container::{FruitId, FruitInstance};
    use crate::sim::throw;
    use glam::Vec2;

    fn state_with_board(tiers: &[usize]) -> GameState {
        let mut state = GameState::new(Settings::default(), 11);
        for (i, &tier) in tiers.iter().enumerate() {
            let mut fruit = FruitInstance::thrown(FruitId(100 + i as u32), tier, Vec2::ZERO);
            fruit.landed = true;
            assert!(state.insert_fruit(fruit));
        }
        state.drain_events();
        state
    }

    #[test]
    fn test_offer_lists_present_tiers() {
        let mut state = state_with_board(&[3, 0, 2, 3, 0]);
        let offer = request_elimination(&mut state);
        assert_eq!(offer.tiers, vec![0, 2, 3]);
        assert_eq!(offer.price, 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::EliminationRequested {
                tiers: vec![0, 2, 3],
                price: 1
            }]
        );
    }

    #[test]
    fn test_empty_board_offers_nothing() {
        let mut state = state_with_board(&[]);
        assert!(request_elimination(&mut state).tiers.is_empty());
    }

    #[test]
    fn test_pay_then_refuse() {
        let mut state = state_with_board(&[0, 2, 2, 3]);
        // 15 coins earned at step 5 doubles the price to 8; spend 5 to leave 10
        state.earn_coins(15);
        assert_eq!(state.price.price(), 8);
        state.try_spend_coins(5);
        assert_eq!(state.ledger.total(), 10);

        let done = confirm_elimination(&mut state, 2).unwrap();
        assert_eq!(done.destroyed, 2);
        assert_eq!(done.total, 2);
        assert_eq!(state.container.present_tiers(), vec![0, 3]);

        let err = confirm_elimination(&mut state, 3).unwrap_err();
        assert_eq!(err, EliminationError::InsufficientCoins { price: 8, total: 2 });
        assert_eq!(state.container.present_tiers(), vec![0, 3]);
        assert_eq!(state.ledger.total(), 2);
    }

    #[test]
    fn test_price_read_at_confirm_time() {
        let mut state = state_with_board(&[1]);
        let offer = request_elimination(&mut state);
        assert_eq!(offer.price, 1);

        state.earn_coins(5);
        let done = confirm_elimination(&mut state, 1).unwrap();
        assert_eq!(done.price, 2);
        assert_eq!(done.total, 3);
    }

    #[test]
    fn test_unknown_tier_costs_nothing() {
        let mut state = state_with_board(&[0]);
        state.earn_coins(3);
        assert_eq!(
            confirm_elimination(&mut state, 99),
            Err(EliminationError::UnknownTier(99))
        );
        assert_eq!(state.ledger.total(), 3);
    }

    #[test]
    fn test_eliminating_in_flight_fruit_advances_throw() {
        let mut state = state_with_board(&[]);
        let held = state.thrower.held().unwrap();
        throw::commit_throw(&mut state);
        state.earn_coins(1);
        state.drain_events();

        let done = confirm_elimination(&mut state, held.tier).unwrap();
        assert_eq!(done.destroyed, 1);
        assert!(state.thrower.can_throw());

        let events = state.drain_events();
        let landed = events
            .iter()
            .position(|e| *e == GameEvent::FruitLanded { id: held.id })
            .unwrap();
        let spawned = events
            .iter()
            .position(|e| matches!(e, GameEvent::FruitSpawned { .. }))
            .unwrap();
        assert!(landed < spawned);
    }

    #[test]
    fn test_ended_run_refuses() {
        let mut state = state_with_board(&[0]);
        state.earn_coins(3);
        state.game_over();
        assert_eq!(confirm_elimination(&mut state, 0), Err(EliminationError::RunOver));
        assert_eq!(state.ledger.total(), 3);
    }

    #[test]
    fn test_success_starts_knob_spin() {
        let mut state = state_with_board(&[0]);
        state.earn_coins(1);
        confirm_elimination(&mut state, 0).unwrap();
        assert!(state.timers.is_pending(TimerKind::KnobSpin));
    }
}
