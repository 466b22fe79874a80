//! Sound cue selection
//!
//! Turns game events into play/stop commands for whatever audio backend the
//! adapter uses. Pitch jitter comes from a seeded RNG so replays sound the
//! same.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameEvent, RunOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Thrown fruit touched down
    Landing,
    /// Two fruits merged
    Merge,
    /// Elimination knob turning
    KnobTurn,
    /// Run won (container emptied)
    Win,
    /// Run lost
    GameOver,
}

impl SoundEffect {
    /// Random pitch range around 1.0
    fn pitch_jitter(&self) -> f32 {
        match self {
            SoundEffect::Landing => 0.1,
            SoundEffect::Merge => 0.05,
            _ => 0.0,
        }
    }

    /// Per-effect volume before master/sfx scaling
    fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Merge | SoundEffect::KnobTurn => 0.65,
            _ => 1.0,
        }
    }
}

/// Instruction for the audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundCommand {
    Play {
        effect: SoundEffect,
        pitch: f32,
        volume: f32,
    },
    /// Cut the merge channel (a newer merge restarts it)
    StopMerge,
}

/// Picks sound commands for game events
#[derive(Debug, Clone)]
pub struct AudioDirector {
    rng: Pcg32,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioDirector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Sound command for an event, if it has one
    pub fn command_for(&mut self, event: &GameEvent) -> Option<SoundCommand> {
        let effect = match event {
            GameEvent::FruitLanded { .. } => SoundEffect::Landing,
            GameEvent::FruitMerged { .. } => SoundEffect::Merge,
            GameEvent::FruitsEliminated { .. } => SoundEffect::KnobTurn,
            GameEvent::RunEnded {
                outcome: RunOutcome::Win,
            } => SoundEffect::Win,
            GameEvent::RunEnded {
                outcome: RunOutcome::Loss,
            } => SoundEffect::GameOver,
            GameEvent::MergeCueStopped => return Some(SoundCommand::StopMerge),
            _ => return None,
        };
        if self.muted {
            return None;
        }

        let jitter = effect.pitch_jitter();
        let pitch = if jitter > 0.0 {
            self.rng.random_range(1.0 - jitter..=1.0 + jitter)
        } else {
            1.0
        };
        let volume = effect.base_volume() * self.master_volume * self.sfx_volume;
        Some(SoundCommand::Play {
            effect,
            pitch,
            volume,
        })
    }
}
