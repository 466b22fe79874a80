//! Merge Fruit - drop fruits, merge pairs, spend coins to clear a tier
//!
//! Core modules:
//! - `sim`: Deterministic game core (merging, throwing, coins, elimination)
//! - `settings`: Data-driven tunables loaded from JSON
//! - `audio`: Sound cue selection for the presentation layer

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{FruitTierSettings, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep used by the demo driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Default earn step between spin price doublings
    pub const DEFAULT_COINS_PER_DOUBLE_STEP: i64 = 5;
    /// Spin price at the start of a run
    pub const DEFAULT_SPIN_PRICE: u64 = 1;
    /// Highest tier index the selector may hand out by default
    pub const DEFAULT_HIGHEST_STARTING_INDEX: usize = 3;

    /// Merge cue playback clamp (seconds)
    pub const MERGE_CUE_MIN_SECONDS: f32 = 0.05;
    pub const MERGE_CUE_MAX_SECONDS: f32 = 10.0;
    /// Shortest knob spin animation (seconds)
    pub const KNOB_SPIN_MIN_SECONDS: f32 = 0.05;
}

/// Midpoint between two world positions
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
