//! Rendering boundary
//!
//! The core only produces read-only snapshots; textures, blitting and screen
//! composition belong to whatever implements [`Renderer`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, Facing, SimState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub bounds: Aabb,
    pub facing: Facing,
}

/// Everything needed to draw one frame of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub trees: Vec<Aabb>,
    pub coins: Vec<Aabb>,
    pub camera: Vec2,
    pub coin_counter: u32,
    pub display_speed: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &SimState) -> Self {
        Self {
            player: PlayerView {
                pos: state.player.pos(),
                bounds: state.player.bounds(),
                facing: state.facing(),
            },
            trees: state.trees.iter().map(|t| t.bounds).collect(),
            coins: state.coins.iter().map(|c| c.bounds).collect(),
            camera: state.camera,
            coin_counter: state.coin_counter,
            display_speed: state.display_speed(),
        }
    }
}

/// World box to screen box: shift by the camera offset
#[inline]
pub fn screen_bounds(bounds: &Aabb, camera: Vec2) -> Aabb {
    bounds.translated(-camera)
}

pub trait Renderer {
    /// Draw the world; not called while the menu is up
    fn draw(&mut self, snapshot: &RenderSnapshot);
    /// Flip the frame
    fn present(&mut self) {}
}

/// Headless renderer that only traces what it would draw
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
    /// Screen height used to cull off-screen trees in the trace
    pub screen_height: f32,
}

impl LogRenderer {
    pub fn new(screen_height: f32) -> Self {
        Self {
            frames: 0,
            screen_height,
        }
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) {
        let visible = snapshot
            .trees
            .iter()
            .map(|t| screen_bounds(t, snapshot.camera))
            .filter(|t| t.max.y >= 0.0 && t.min.y <= self.screen_height)
            .count();
        let player = screen_bounds(&snapshot.player.bounds, snapshot.camera);
        log::trace!(
            "frame {}: skier at {:?} facing {:?}, {} trees on screen, coins {}",
            self.frames,
            player.center(),
            snapshot.player.facing,
            visible,
            snapshot.coin_counter
        );
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Coin, LevelLayout, Tree};

    #[test]
    fn test_snapshot_and_screen_mapping() {
        let layout = LevelLayout {
            trees: vec![Tree::new(50.0, 70.0)],
            coins: vec![Coin::new(30.0, 150.0)],
        };
        let mut state = SimState::with_layout(400.0, layout);
        state.camera = Vec2::new(0.0, 40.0);
        state.speed.x = -1.0;

        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.player.facing, Facing::Left);
        assert_eq!(snapshot.trees.len(), 1);
        assert_eq!(snapshot.coins.len(), 1);
        assert_eq!(snapshot.display_speed, 5.7);

        let tree = screen_bounds(&snapshot.trees[0], snapshot.camera);
        assert_eq!(tree.center(), Vec2::new(50.0, 30.0));
    }
}
