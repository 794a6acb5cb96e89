//! Per-frame simulation tick
//!
//! Speeds grow by a fixed amount every tick, so gameplay is tied to the
//! frame rate rather than to wall-clock time.

use serde::{Deserialize, Serialize};

use super::collision::{Crash, check_crash, collect_coins};
use super::state::SimState;
use crate::consts::*;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Set when the run is over
    pub crash: Option<Crash>,
    /// Coins picked up this tick
    pub coins_collected: u32,
}

/// Advance the run by one tick. Does nothing while paused.
pub fn tick(state: &mut SimState) -> TickOutcome {
    if state.paused {
        return TickOutcome::default();
    }

    state.time_ticks += 1;

    // Move with the speed of the previous tick; the bounding box follows
    state.player.translate(state.speed);

    // Accelerate: vertical always grows, horizontal grows away from zero
    state.speed.y += ACCELERATION;
    if state.speed.x > 0.0 {
        state.speed.x += ACCELERATION;
    } else {
        state.speed.x -= ACCELERATION;
    }

    // Camera follows the descent only
    state.camera.y += state.speed.y;

    let crash = check_crash(&state.player, &state.trees, state.world_width);

    // Coins still count on the tick that ends the run
    let coins_collected = collect_coins(&state.player, &mut state.coins);
    state.coin_counter += coins_collected;

    TickOutcome {
        crash,
        coins_collected,
    }
}

/// Jump-turn trick: trims vertical speed and flips horizontal direction.
///
/// Above the flip threshold the flip also loses a little horizontal speed.
pub fn apply_trick(state: &mut SimState) {
    let speed = &mut state.speed;
    speed.y -= TRICK_VERTICAL_TRIM;
    if speed.x.abs() > TRICK_FLIP_THRESHOLD {
        if speed.x > 0.0 {
            speed.x = -speed.x + TRICK_FLIP_DAMPING;
        } else {
            speed.x = -speed.x - TRICK_FLIP_DAMPING;
        }
    } else {
        speed.x = -speed.x;
    }
}
