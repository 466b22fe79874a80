//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by fruit ID)
//! - No rendering, physics or platform dependencies
//!
//! The engine adapter reports contacts and frame input; everything the
//! presentation layer needs comes back out as [`GameEvent`]s.

pub mod catalog;
pub mod container;
pub mod eliminate;
pub mod ledger;
pub mod merge;
pub mod player;
pub mod price;
pub mod selector;
pub mod state;
pub mod throw;
pub mod tick;
pub mod timer;

pub use catalog::{FruitCatalog, FruitTier};
pub use container::{FruitId, FruitInstance, PlayContainer};
pub use eliminate::{
    Elimination, EliminationError, EliminationOffer, confirm_elimination, present_tiers,
    request_elimination,
};
pub use ledger::{CoinChange, CoinLedger};
pub use merge::{ContactTarget, MergeOutcome, on_contact};
pub use player::Player;
pub use price::SpinPriceModel;
pub use selector::FruitSelector;
pub use state::{GameEvent, GamePhase, GameState, RunOutcome};
pub use throw::{HeldFruit, ThrowController, ThrowPhase, commit_throw};
pub use tick::{TickInput, tick};
pub use timer::{TimerKind, Timers};
