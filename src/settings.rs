//! Game tunables
//!
//! Loaded from a JSON file so balance can change without a rebuild. Every
//! field has a default, and out-of-range values are replaced rather than
//! rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One rung of the fruit ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitTierSettings {
    /// Engine-side template the adapter instantiates for this tier
    pub template: String,
    /// Coins awarded when two of this tier merge
    pub score_value: u64,
    /// Collider radius (world units), used for the movement boundary
    pub radius: f32,
}

impl FruitTierSettings {
    pub fn new(template: impl Into<String>, score_value: u64, radius: f32) -> Self {
        Self {
            template: template.into(),
            score_value,
            radius,
        }
    }
}

const DEFAULT_FRUITS: [&str; 11] = [
    "cherry",
    "strawberry",
    "grape",
    "dekopon",
    "persimmon",
    "apple",
    "pear",
    "peach",
    "pineapple",
    "melon",
    "watermelon",
];

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Fruit ladder ===
    /// Tiers in merge order; the last one wraps back to the first
    pub tiers: Vec<FruitTierSettings>,
    /// Highest tier index the selector hands out for throwing
    pub highest_starting_index: usize,

    // === Coin economy ===
    /// Coins earned between spin price doublings
    pub coins_per_double_step: i64,
    /// Spin price at the start of a run
    pub initial_spin_price: u64,
    /// Coins in the ledger at the start of a run
    pub starting_coins: u64,

    // === Player ===
    /// Extra margin kept between the held fruit and the arena walls
    pub edge_padding: f32,
    pub move_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Arena walls (world x) the held fruit may not cross
    pub arena_left: f32,
    pub arena_right: f32,
    /// World y a thrown fruit is released from
    pub drop_height: f32,

    // === Timed effects (seconds) ===
    /// Merge sound is cut after this long
    pub merge_cue_seconds: f32,
    /// Knob spin animation after a purchased elimination
    pub knob_spin_seconds: f32,
    /// End screen fade-in
    pub fade_seconds: f32,
    /// End screen hold before a reload is requested
    pub end_screen_hold_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let tiers = DEFAULT_FRUITS
            .iter()
            .enumerate()
            .map(|(i, name)| FruitTierSettings::new(*name, i as u64 + 1, 0.25 + 0.1 * i as f32))
            .collect();

        Self {
            tiers,
            highest_starting_index: DEFAULT_HIGHEST_STARTING_INDEX,

            coins_per_double_step: DEFAULT_COINS_PER_DOUBLE_STEP,
            initial_spin_price: DEFAULT_SPIN_PRICE,
            starting_coins: 0,

            edge_padding: 0.12,
            move_speed: 5.0,
            acceleration: 35.0,
            deceleration: 55.0,
            arena_left: -2.5,
            arena_right: 2.5,
            drop_height: 4.0,

            merge_cue_seconds: 0.95,
            knob_spin_seconds: 0.5,
            fade_seconds: 2.0,
            end_screen_hold_seconds: 1.5,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string (missing fields use defaults)
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Replace invalid tunables with safe values.
    ///
    /// Returns a description of every substitution made (also logged).
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = Settings::default();
        let mut fixes = Vec::new();

        if self.coins_per_double_step <= 0 {
            fixes.push(format!(
                "coins_per_double_step {} -> {}",
                self.coins_per_double_step, DEFAULT_COINS_PER_DOUBLE_STEP
            ));
            self.coins_per_double_step = DEFAULT_COINS_PER_DOUBLE_STEP;
        }
        if self.initial_spin_price == 0 {
            fixes.push(format!("initial_spin_price 0 -> {}", DEFAULT_SPIN_PRICE));
            self.initial_spin_price = DEFAULT_SPIN_PRICE;
        }

        if !self.merge_cue_seconds.is_finite() {
            fixes.push(format!("merge_cue_seconds -> {}", defaults.merge_cue_seconds));
            self.merge_cue_seconds = defaults.merge_cue_seconds;
        }
        let clamped = self
            .merge_cue_seconds
            .clamp(MERGE_CUE_MIN_SECONDS, MERGE_CUE_MAX_SECONDS);
        if clamped != self.merge_cue_seconds {
            fixes.push(format!("merge_cue_seconds {} -> {}", self.merge_cue_seconds, clamped));
            self.merge_cue_seconds = clamped;
        }

        if !self.knob_spin_seconds.is_finite()
            || self.knob_spin_seconds < KNOB_SPIN_MIN_SECONDS
        {
            fixes.push(format!(
                "knob_spin_seconds {} -> {}",
                self.knob_spin_seconds, KNOB_SPIN_MIN_SECONDS
            ));
            self.knob_spin_seconds = KNOB_SPIN_MIN_SECONDS;
        }

        for (name, value) in [
            ("fade_seconds", &mut self.fade_seconds),
            ("end_screen_hold_seconds", &mut self.end_screen_hold_seconds),
            ("move_speed", &mut self.move_speed),
            ("acceleration", &mut self.acceleration),
            ("deceleration", &mut self.deceleration),
            ("edge_padding", &mut self.edge_padding),
        ] {
            if !value.is_finite() || *value < 0.0 {
                fixes.push(format!("{} {} -> 0", name, value));
                *value = 0.0;
            }
        }

        if !self.arena_left.is_finite() || !self.arena_right.is_finite() {
            fixes.push(format!(
                "arena bounds ({}, {}) -> ({}, {})",
                self.arena_left, self.arena_right, defaults.arena_left, defaults.arena_right
            ));
            self.arena_left = defaults.arena_left;
            self.arena_right = defaults.arena_right;
        }
        if self.arena_left > self.arena_right {
            fixes.push(format!(
                "arena bounds swapped ({}, {})",
                self.arena_left, self.arena_right
            ));
            std::mem::swap(&mut self.arena_left, &mut self.arena_right);
        }

        if !self.drop_height.is_finite() {
            fixes.push(format!("drop_height -> {}", defaults.drop_height));
            self.drop_height = defaults.drop_height;
        }

        for tier in &mut self.tiers {
            if !tier.radius.is_finite() || tier.radius < 0.0 {
                fixes.push(format!("{} radius {} -> 0", tier.template, tier.radius));
                tier.radius = 0.0;
            }
        }

        for fix in &fixes {
            log::warn!("Settings: {}", fix);
        }
        fixes
    }
}
