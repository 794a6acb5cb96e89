//! Simulation state and slope entities
//!
//! Everything the renderer and HUD read lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// A tree on the slope. Never moves once placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub pos: Vec2,
    pub bounds: Aabb,
}

impl Tree {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            bounds: Aabb::from_center(pos, Vec2::splat(ENTITY_SIZE)),
        }
    }
}

/// A coin waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub bounds: Aabb,
    /// Set during the collection pass, right before the coin is dropped
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            bounds: Aabb::from_center(pos, Vec2::splat(ENTITY_SIZE)),
            collected: false,
        }
    }
}

/// Which way the skier sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Derived from horizontal speed; zero counts as left
    pub fn from_speed_x(speed_x: f32) -> Self {
        if speed_x > 0.0 { Facing::Right } else { Facing::Left }
    }
}

/// The skier. Speed is owned by the simulation, not the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pos: Vec2,
    bounds: Aabb,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            bounds: Self::bounds_at(pos),
        }
    }

    fn bounds_at(pos: Vec2) -> Aabb {
        Aabb::from_center(pos, Vec2::splat(PLAYER_SIZE))
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Teleport the player; the bounding box follows
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.bounds = Self::bounds_at(pos);
    }

    /// Move the player by `delta`; the bounding box follows
    pub fn translate(&mut self, delta: Vec2) {
        self.set_pos(self.pos + delta);
    }
}

/// Trees and coins produced by a level load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelLayout {
    pub trees: Vec<Tree>,
    pub coins: Vec<Coin>,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Camera offset subtracted from world positions when drawing
    pub camera: Vec2,
    /// Per-tick displacement of the player
    pub speed: Vec2,
    pub player: Player,
    /// Loaded once per level, never modified afterwards
    pub trees: Vec<Tree>,
    /// Shrinks as coins are collected
    pub coins: Vec<Coin>,
    pub coin_counter: u32,
    /// Freezes `tick` (set on game over)
    pub paused: bool,
    /// Right-hand world bound; the left one is 0
    pub world_width: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    /// Fresh run: player at the top middle, initial speed, empty slope
    pub fn new(world_width: f32) -> Self {
        Self {
            camera: Vec2::ZERO,
            speed: Vec2::splat(INITIAL_SPEED),
            player: Player::new(world_width / 2.0, PLAYER_START_Y),
            trees: Vec::new(),
            coins: Vec::new(),
            coin_counter: 0,
            paused: false,
            world_width,
            time_ticks: 0,
        }
    }

    /// Fresh run populated with a level layout
    pub fn with_layout(world_width: f32, layout: LevelLayout) -> Self {
        let mut state = Self::new(world_width);
        state.trees = layout.trees;
        state.coins = layout.coins;
        state
    }

    pub fn facing(&self) -> Facing {
        Facing::from_speed_x(self.speed.x)
    }

    pub fn display_speed(&self) -> f32 {
        crate::display_speed(self.speed.y)
    }
}
