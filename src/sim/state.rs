//! Game state and composition root
//!
//! `GameState` owns every service of a run. Engine adapters drive it through
//! `tick`, `on_contact` and the elimination calls, then drain the queued
//! [`GameEvent`]s for presentation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::FruitCatalog;
use super::container::{FruitId, FruitInstance, PlayContainer};
use super::ledger::{CoinChange, CoinLedger};
use super::player::Player;
use super::price::SpinPriceModel;
use super::selector::FruitSelector;
use super::throw::{self, ThrowController};
use super::timer::{TimerKind, Timers};
use crate::settings::Settings;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Container emptied after at least one throw
    Win,
    /// Fruits overflowed the container
    Loss,
    /// Player restarted before the run was decided
    Abandoned,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// End screen showing; a reload follows
    Ended(RunOutcome),
}

/// One-way notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new fruit is held at the throw origin
    FruitSpawned { id: FruitId, tier: usize },
    /// The held fruit was released into the container
    FruitThrown { id: FruitId, tier: usize, pos: Vec2 },
    /// A thrown fruit touched something for the first time
    FruitLanded { id: FruitId },
    /// Two fruits merged into `merged_id`
    FruitMerged {
        survivor: FruitId,
        absorbed: FruitId,
        tier: usize,
        merged_id: FruitId,
        merged_tier: usize,
        pos: Vec2,
        coins: u64,
    },
    CoinsChanged { total: u64 },
    SpinPriceChanged { price: u64 },
    /// Player opened the elimination picker
    EliminationRequested { tiers: Vec<usize>, price: u64 },
    FruitsEliminated { tier: usize, count: usize, price: u64 },
    /// Merge sound should stop now
    MergeCueStopped,
    /// Knob spin animation finished
    KnobSpinFinished,
    RunEnded { outcome: RunOutcome },
    /// End screen done; the adapter should reload the level
    ReloadRequested { outcome: RunOutcome },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    pub catalog: FruitCatalog,
    pub ledger: CoinLedger,
    pub price: SpinPriceModel,
    pub selector: FruitSelector,
    pub thrower: ThrowController,
    pub player: Player,
    pub container: PlayContainer,
    pub timers: Timers,
    /// Set once any fruit entered the container (gates the win check)
    pub has_placed_fruit: bool,
    /// Pending events, oldest first
    pub events: Vec<GameEvent>,
    /// `ReloadRequested` already sent; the adapter owns the run from here
    pub reload_requested: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run and hold its first fruit.
    ///
    /// Invalid tunables are replaced first, the same way a loaded file is.
    pub fn new(mut settings: Settings, seed: u64) -> Self {
        settings.sanitize();
        let catalog = FruitCatalog::new(&settings.tiers);
        let selector = FruitSelector::new(seed, settings.highest_starting_index, catalog.len());
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            ledger: CoinLedger::new(settings.starting_coins),
            price: SpinPriceModel::new(settings.initial_spin_price, settings.coins_per_double_step),
            selector,
            thrower: ThrowController::default(),
            player: Player::new(&settings),
            container: PlayContainer::new(),
            timers: Timers::new(),
            has_placed_fruit: false,
            events: Vec::new(),
            reload_requested: false,
            next_id: 1,
            catalog,
            settings,
        };

        state.emit(GameEvent::CoinsChanged {
            total: state.ledger.total(),
        });
        throw::spawn_next(&mut state);

        log::info!(
            "Run started: seed {}, {} tiers, spin price {}",
            seed,
            state.catalog.len(),
            state.price.price()
        );
        state
    }

    /// Allocate a new entity ID, or `None` once the id space is used up
    pub fn next_entity_id(&mut self) -> Option<FruitId> {
        let Some(next) = self.next_id.checked_add(1) else {
            log::warn!("Fruit id space exhausted");
            return None;
        };
        let id = FruitId(self.next_id);
        self.next_id = next;
        Some(id)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place an engine-provided fruit directly into the container.
    ///
    /// Later allocations are kept above its id. A live id, or `u32::MAX`
    /// (nothing could be allocated above it), is refused.
    pub fn insert_fruit(&mut self, fruit: FruitInstance) -> bool {
        if self.container.contains(fruit.id) {
            log::warn!("Refusing fruit {}: id already live", fruit.id);
            return false;
        }
        let Some(after) = fruit.id.0.checked_add(1) else {
            log::warn!("Refusing fruit {}: id space exhausted", fruit.id);
            return false;
        };
        self.next_id = self.next_id.max(after);
        self.has_placed_fruit = true;
        self.container.insert(fruit);
        true
    }

    /// Record the engine's latest position for a live fruit
    pub fn set_fruit_position(&mut self, id: FruitId, pos: Vec2) -> bool {
        match self.container.get_mut(id) {
            Some(fruit) => {
                fruit.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Award coins and notify observers before returning
    pub fn earn_coins(&mut self, amount: u64) -> Option<CoinChange> {
        let change = self.ledger.earn(amount)?;
        self.publish_coin_change(change);
        Some(change)
    }

    /// Spend coins if affordable; a refused spend changes and emits nothing
    pub fn try_spend_coins(&mut self, amount: u64) -> Option<CoinChange> {
        let change = self.ledger.try_spend(amount)?;
        self.publish_coin_change(change);
        Some(change)
    }

    fn publish_coin_change(&mut self, change: CoinChange) {
        self.emit(GameEvent::CoinsChanged {
            total: change.total,
        });
        if self.price.observe(change) {
            let price = self.price.price();
            log::debug!("Spin price doubled to {}", price);
            self.emit(GameEvent::SpinPriceChanged { price });
        }
    }

    /// Destroy a live fruit. Destroying the in-flight fruit counts as its
    /// landing so the throw cycle keeps going.
    pub fn destroy_fruit(&mut self, id: FruitId) -> Option<FruitInstance> {
        let fruit = self.container.remove(id)?;
        if self.thrower.in_flight() == Some(id) {
            log::debug!("Fruit {} destroyed in flight", id);
            self.emit(GameEvent::FruitLanded { id });
            throw::on_landed(self, id);
        }
        Some(fruit)
    }

    /// Engine reports the container overflowed
    pub fn game_over(&mut self) {
        self.end_run(RunOutcome::Loss);
    }

    /// End the run once; later calls are ignored
    pub fn end_run(&mut self, outcome: RunOutcome) {
        if !self.is_playing() {
            return;
        }
        log::info!(
            "Run ended: {:?} with {} coins",
            outcome,
            self.ledger.total()
        );
        self.phase = GamePhase::Ended(outcome);
        self.emit(GameEvent::RunEnded { outcome });
        let hold = self.settings.fade_seconds + self.settings.end_screen_hold_seconds;
        self.timers.schedule(TimerKind::EndScreen, hold);
    }

    /// Start over now: an undecided run ends as abandoned and the end
    /// screen is skipped.
    pub fn restart(&mut self) {
        self.end_run(RunOutcome::Abandoned);
        self.timers.cancel(TimerKind::EndScreen);
        if let GamePhase::Ended(outcome) = self.phase {
            self.request_reload(outcome);
        }
    }

    /// Ask the adapter to reload the level; only the first request is sent
    pub fn request_reload(&mut self, outcome: RunOutcome) {
        if self.reload_requested {
            return;
        }
        log::info!("Requesting reload after {:?}", outcome);
        self.reload_requested = true;
        self.emit(GameEvent::ReloadRequested { outcome });
    }
}
