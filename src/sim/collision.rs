//! Collision detection for the slope
//!
//! Everything on the slope is an axis-aligned box centered on its position,
//! so a single overlap test covers trees, coins and the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Coin, Player, Tree};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Same box shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    /// Skied off the left edge of the world
    LeftEdge,
    /// Skied off the right edge of the world
    RightEdge,
    /// Hit a tree (index into the tree collection)
    Tree { index: usize },
}

/// Check whether the player has crashed.
///
/// Bounds are tested before trees; the first hit wins.
pub fn check_crash(player: &Player, trees: &[Tree], world_width: f32) -> Option<Crash> {
    let x = player.pos().x;
    if x < 0.0 {
        return Some(Crash::LeftEdge);
    }
    if x > world_width {
        return Some(Crash::RightEdge);
    }
    let bounds = player.bounds();
    trees
        .iter()
        .position(|tree| tree.bounds.intersects(&bounds))
        .map(|index| Crash::Tree { index })
}

/// Collect every coin the player overlaps. Returns how many were picked up.
///
/// Collected coins are marked during the pass and dropped afterwards, so a
/// coin can only ever be counted once.
pub fn collect_coins(player: &Player, coins: &mut Vec<Coin>) -> u32 {
    let bounds = player.bounds();
    let mut collected = 0;
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if coin.bounds.intersects(&bounds) {
            coin.collected = true;
            collected += 1;
        }
    }
    coins.retain(|c| !c.collected);
    collected
}
