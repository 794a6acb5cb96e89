//! Ski Runner - a downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, physics, collisions, tick)
//! - `level`: Level decoding from raster + metadata asset pairs
//! - `controller`: Menu / playing / game-over state machine
//! - `engine`: Frame loop wiring controller, UI, renderer and input together
//! - `platform`: Frame-rate governor
//! - `settings`: JSON configuration

pub mod controller;
pub mod engine;
pub mod input;
pub mod level;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use controller::{GameController, GamePhase};
pub use engine::Engine;
pub use input::Intent;
pub use level::{LevelError, LevelLoader};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default window dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Default frame-rate cap
    pub const FRAME_RATE: u32 = 30;

    /// Level grid pitch in world units; entities sit in the middle of a cell
    pub const GRID_PITCH: f32 = 20.0;
    pub const CELL_CENTER: f32 = 10.0;

    /// Tree and coin bounding box edge
    pub const ENTITY_SIZE: f32 = 5.0;
    /// Player bounding box edge
    pub const PLAYER_SIZE: f32 = 10.0;
    /// Player spawn height (x is the middle of the screen)
    pub const PLAYER_START_Y: f32 = 100.0;

    /// Speed at the start of every run, both axes
    pub const INITIAL_SPEED: f32 = 4.0;
    /// Per-tick speed gain (frame-coupled, not scaled by dt)
    pub const ACCELERATION: f32 = 0.005;

    /// Coin odds for an eligible cell: one draw in 0..=COIN_DRAW_MAX hits on zero
    pub const COIN_DRAW_MAX: u32 = 50;

    /// Trick tuning
    pub const TRICK_VERTICAL_TRIM: f32 = 0.1;
    pub const TRICK_FLIP_THRESHOLD: f32 = 0.2;
    pub const TRICK_FLIP_DAMPING: f32 = 0.1;
}

/// Speed shown on the HUD: vertical speed projected along the slope, one decimal
#[inline]
pub fn display_speed(speed_y: f32) -> f32 {
    (speed_y * std::f32::consts::SQRT_2 * 10.0).round() / 10.0
}

/// World position of the center of a level grid cell
#[inline]
pub fn cell_to_world(row: usize, col: usize) -> glam::Vec2 {
    use consts::{CELL_CENTER, GRID_PITCH};
    glam::Vec2::new(
        col as f32 * GRID_PITCH + CELL_CENTER,
        row as f32 * GRID_PITCH + CELL_CENTER,
    )
}
