//! Delayed effects
//!
//! At most one pending timer per kind. Scheduling a kind that is already
//! pending replaces it, so only the newest request ever fires.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Cut the merge sound short
    MergeCue,
    /// Hide the knob after its spin
    KnobSpin,
    /// End screen finished fading and holding
    EndScreen,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    pending: BTreeMap<TimerKind, f32>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a timer
    pub fn schedule(&mut self, kind: TimerKind, seconds: f32) {
        self.pending.insert(kind, seconds.max(0.0));
    }

    /// Returns true if a pending timer was dropped
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.pending.remove(&kind).is_some()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn remaining(&self, kind: TimerKind) -> Option<f32> {
        self.pending.get(&kind).copied()
    }

    /// Advance all timers, returning the kinds that fired
    pub fn advance(&mut self, dt: f32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for (kind, remaining) in self.pending.iter_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                fired.push(*kind);
            }
        }
        for kind in &fired {
            self.pending.remove(kind);
        }
        fired
    }
}
