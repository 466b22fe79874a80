use glam::Vec2;

use merge_fruit::consts::FRAME_DT;
use merge_fruit::settings::{FruitTierSettings, Settings};
use merge_fruit::sim::{
    ContactTarget, EliminationError, FruitId, FruitInstance, GameEvent, GamePhase, GameState,
    RunOutcome, TickInput, confirm_elimination, on_contact, request_elimination, tick,
};

fn five_tier_settings() -> Settings {
    Settings {
        tiers: (0..5)
            .map(|i| FruitTierSettings::new(format!("fruit{i}"), i as u64 + 1, 0.2 + 0.1 * i as f32))
            .collect(),
        ..Default::default()
    }
}

fn throw_input() -> TickInput {
    TickInput {
        throw: true,
        ..Default::default()
    }
}

fn resident(state: &mut GameState, id: u32, tier: usize) -> FruitId {
    let mut fruit = FruitInstance::thrown(FruitId(id), tier, Vec2::new(id as f32 * 0.1, 0.0));
    fruit.landed = true;
    assert!(state.insert_fruit(fruit));
    FruitId(id)
}

#[test]
fn throw_land_cycle_uses_preview() {
    let mut state = GameState::new(five_tier_settings(), 2024);
    let mut thrown_tiers = Vec::new();
    let mut previews = Vec::new();

    for _ in 0..8 {
        let held = state.thrower.held().expect("holding a fruit");
        thrown_tiers.push(held.tier);
        previews.push(state.selector.peek().expect("preview rolled"));

        tick(&mut state, &throw_input(), FRAME_DT);
        assert!(!state.thrower.can_throw());

        // Extra presses while in flight are dropped
        tick(&mut state, &throw_input(), FRAME_DT);
        on_contact(&mut state, held.id, ContactTarget::Static);
        assert!(state.thrower.can_throw());
    }

    // Every spawned fruit was the preview shown one throw earlier
    assert_eq!(&thrown_tiers[1..], &previews[..previews.len() - 1]);
    assert!(thrown_tiers.iter().all(|t| *t <= 3));
}

#[test]
fn merge_chain_awards_and_prices() {
    let mut state = GameState::new(five_tier_settings(), 1);
    state.drain_events();

    // Two tier-2 fruits merge (3 coins) into tier 3; a waiting tier 3 then
    // merges with it (4 coins) into tier 4.
    let a = resident(&mut state, 10, 2);
    let b = resident(&mut state, 11, 2);
    let c = resident(&mut state, 12, 3);

    let first = on_contact(&mut state, b, ContactTarget::Fruit(a)).unwrap();
    assert_eq!(first.merged_tier, 3);
    let second = on_contact(&mut state, first.merged_id, ContactTarget::Fruit(c)).unwrap();
    assert_eq!(second.merged_tier, 4);

    assert_eq!(state.ledger.total(), 7);
    assert_eq!(state.price.price(), 2);
    assert_eq!(state.price.earned_since_last_double(), 2);
    assert_eq!(state.container.present_tiers(), vec![4]);

    let coin_events: Vec<_> = state
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::CoinsChanged { total } => Some(total),
            _ => None,
        })
        .collect();
    assert_eq!(coin_events, vec![3, 7]);
}

#[test]
fn elimination_scenario() {
    let mut state = GameState::new(Settings::default(), 5);
    resident(&mut state, 20, 0);
    resident(&mut state, 21, 2);
    resident(&mut state, 22, 2);
    resident(&mut state, 23, 3);

    // Earn 15 (price 1 -> 8), then spend down to 10
    state.earn_coins(15);
    state.try_spend_coins(5);
    assert_eq!((state.ledger.total(), state.price.price()), (10, 8));

    let offer = request_elimination(&mut state);
    assert_eq!(offer.tiers, vec![0, 2, 3]);

    let done = confirm_elimination(&mut state, 2).unwrap();
    assert_eq!(done.destroyed, 2);
    assert_eq!(state.ledger.total(), 2);
    assert_eq!(state.container.present_tiers(), vec![0, 3]);

    let err = confirm_elimination(&mut state, 3).unwrap_err();
    assert!(matches!(err, EliminationError::InsufficientCoins { price: 8, total: 2 }));
    assert_eq!(state.container.len(), 2);
    assert_eq!(state.ledger.total(), 2);
}

#[test]
fn clearing_the_board_wins() {
    let mut state = GameState::new(five_tier_settings(), 77);
    let held = state.thrower.held().unwrap();
    tick(&mut state, &throw_input(), FRAME_DT);
    on_contact(&mut state, held.id, ContactTarget::Static);

    state.earn_coins(1);
    confirm_elimination(&mut state, held.tier).unwrap();
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.phase, GamePhase::Ended(RunOutcome::Win));

    // Contacts and throws after the end are ignored
    tick(&mut state, &throw_input(), FRAME_DT);
    assert!(state.container.is_empty());

    let mut reload = false;
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), FRAME_DT);
        if state
            .drain_events()
            .contains(&GameEvent::ReloadRequested {
                outcome: RunOutcome::Win,
            })
        {
            reload = true;
            break;
        }
    }
    assert!(reload);
}

#[test]
fn overflow_loses() {
    let mut state = GameState::new(five_tier_settings(), 3);
    state.drain_events();
    state.game_over();
    state.game_over();
    let ended = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
        .count();
    assert_eq!(ended, 1);
    assert_eq!(state.phase, GamePhase::Ended(RunOutcome::Loss));
}
