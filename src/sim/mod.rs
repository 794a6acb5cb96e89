//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-tick increments only (no delta time)
//! - Stable iteration order (load order of trees and coins)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Crash, check_crash, collect_coins};
pub use state::{Coin, Facing, LevelLayout, Player, SimState, Tree};
pub use tick::{TickOutcome, apply_trick, tick};
