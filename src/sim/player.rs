//! Horizontal player movement
//!
//! The player carries the held fruit along the top of the arena. The reachable
//! range shrinks by the held fruit's radius so it can never be released
//! overlapping a wall.

use serde::{Deserialize, Serialize};

use crate::move_towards;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Current x (also the throw origin)
    pub x: f32,
    pub velocity_x: f32,
    pub move_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    starting_left: f32,
    starting_right: f32,
    left: f32,
    right: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            x: (settings.arena_left + settings.arena_right) * 0.5,
            velocity_x: 0.0,
            move_speed: settings.move_speed,
            acceleration: settings.acceleration,
            deceleration: settings.deceleration,
            starting_left: settings.arena_left,
            starting_right: settings.arena_right,
            left: settings.arena_left,
            right: settings.arena_right,
        }
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.left, self.right)
    }

    /// Narrow the walls by the held fruit's extent plus padding
    pub fn change_boundary(&mut self, extent: f32, padding: f32) {
        let inset = extent + padding;
        self.left = self.starting_left + inset;
        self.right = self.starting_right - inset;
        if self.left > self.right {
            let centre = (self.starting_left + self.starting_right) * 0.5;
            self.left = centre;
            self.right = centre;
        }
        self.x = self.x.clamp(self.left, self.right);
    }

    /// Step movement for one frame. `axis` is clamped to [-1, 1].
    pub fn update(&mut self, axis: f32, dt: f32) {
        let axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
        let target = axis * self.move_speed;
        let rate = if target.abs() > 0.0001 {
            self.acceleration
        } else {
            self.deceleration
        };
        self.velocity_x = move_towards(self.velocity_x, target, rate.max(0.0) * dt);

        let x = self.x + self.velocity_x * dt;
        self.x = x.clamp(self.left, self.right);
        if self.x != x {
            self.velocity_x = 0.0;
        }
    }
}
