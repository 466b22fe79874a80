//! Per-frame update
//!
//! Advances timers, moves the player, commits throws and polls the win
//! condition. Contacts arrive separately through `merge::on_contact`.

use super::state::{GameEvent, GamePhase, GameState, RunOutcome};
use super::throw;
use super::timer::TimerKind;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub move_axis: f32,
    /// Throw pressed this frame (edge, not level)
    pub throw: bool,
    /// Restart pressed this frame (edge)
    pub restart: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for kind in state.timers.advance(dt) {
        match kind {
            TimerKind::MergeCue => state.emit(GameEvent::MergeCueStopped),
            TimerKind::KnobSpin => state.emit(GameEvent::KnobSpinFinished),
            TimerKind::EndScreen => {
                if let GamePhase::Ended(outcome) = state.phase {
                    log::debug!("End screen finished");
                    state.request_reload(outcome);
                }
            }
        }
    }

    if input.restart {
        state.restart();
    }

    if !state.is_playing() {
        return;
    }

    state.player.update(input.move_axis, dt);

    if input.throw {
        throw::commit_throw(state);
    }

    // No fruit left after play began
    if state.has_placed_fruit && state.container.is_empty() {
        state.end_run(RunOutcome::Win);
    }
}
