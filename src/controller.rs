//! Game flow: menu, runs, game over
//!
//! The controller owns the current run and turns intents into phase
//! transitions. It tells the UI what to show through [`UiLayer`] and never
//! draws anything itself.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::Intent;
use crate::level::{LevelError, LevelLoader};
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{self, Crash, SimState};
use crate::ui::{self, UiLayer};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen (initial)
    Menu,
    /// Run in progress
    Playing,
    /// Run ended; simulation paused, game-over panel up
    GameOver,
    /// Quit requested; the frame loop stops
    Terminated,
}

/// Owns the current run and routes intents into phase transitions
pub struct GameController {
    phase: GamePhase,
    sim: SimState,
    loader: LevelLoader,
    rng: Pcg32,
    level: u32,
    world_width: f32,
    last_crash: Option<Crash>,
    last_error: Option<String>,
}

impl GameController {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            sim: SimState::new(settings.screen_width),
            loader: LevelLoader::new(&settings.levels_dir),
            rng: Pcg32::seed_from_u64(seed),
            level: settings.level,
            world_width: settings.screen_width,
            last_crash: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::Terminated
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// What ended the last run
    pub fn last_crash(&self) -> Option<Crash> {
        self.last_crash
    }

    /// Message of the last failed level load
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Route one intent. Intents that make no sense in the current phase are dropped.
    pub fn handle_intent(&mut self, intent: Intent, ui: &mut impl UiLayer) {
        match (self.phase, intent) {
            (_, Intent::WindowClosed) | (GamePhase::Menu, Intent::Quit) => {
                log::info!("Quit requested");
                self.phase = GamePhase::Terminated;
            }
            (GamePhase::Menu, Intent::Start) => self.start_game(ui),
            (GamePhase::Playing, Intent::Trick) => sim::apply_trick(&mut self.sim),
            (GamePhase::GameOver, Intent::Replay) => self.play_again(ui),
            (GamePhase::GameOver, Intent::ToMenu) => self.to_menu(ui),
            (phase, intent) => log::debug!("Ignoring {:?} in {:?}", intent, phase),
        }
    }

    /// Advance the run by one tick and refresh the HUD. No-op outside a live run.
    pub fn advance(&mut self, ui: &mut impl UiLayer) {
        if self.phase != GamePhase::Playing || self.sim.paused {
            return;
        }

        let outcome = sim::tick(&mut self.sim);
        ui.set_speed_label(&ui::speed_label(self.sim.display_speed()));
        ui.set_coin_label(&ui::coin_label(self.sim.coin_counter));

        if let Some(crash) = outcome.crash {
            self.game_over(crash, ui);
        }
    }

    /// Snapshot for the renderer; `None` while the menu is up
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        match self.phase {
            GamePhase::Playing | GamePhase::GameOver => Some(RenderSnapshot::capture(&self.sim)),
            GamePhase::Menu | GamePhase::Terminated => None,
        }
    }

    /// Fresh run on the current level. The old run is kept if loading fails.
    fn new_run(&mut self) -> Result<(), LevelError> {
        let layout = self.loader.load(self.level, &mut self.rng)?;
        self.sim = SimState::with_layout(self.world_width, layout);
        self.last_crash = None;
        self.last_error = None;
        Ok(())
    }

    fn show_hud(ui: &mut impl UiLayer) {
        ui.set_coin_label(&ui::coin_label(0));
        ui.set_speed_label(&ui::speed_label(0.0));
        ui.set_hud_visible(true);
    }

    fn start_game(&mut self, ui: &mut impl UiLayer) {
        if let Err(e) = self.new_run() {
            self.load_failed(e, ui);
            return;
        }
        ui.clear_error();
        ui.set_menu_visible(false);
        Self::show_hud(ui);
        self.phase = GamePhase::Playing;
        log::info!("Run started on level {}", self.level);
    }

    fn play_again(&mut self, ui: &mut impl UiLayer) {
        ui.set_game_over_visible(false);
        if let Err(e) = self.new_run() {
            self.load_failed(e, ui);
            return;
        }
        ui.clear_error();
        Self::show_hud(ui);
        self.phase = GamePhase::Playing;
        log::info!("Replaying level {}", self.level);
    }

    fn game_over(&mut self, crash: Crash, ui: &mut impl UiLayer) {
        self.sim.paused = true;
        self.last_crash = Some(crash);
        ui.set_hud_visible(false);
        ui.set_game_over_visible(true);
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}) after {} ticks with {} coins",
            crash,
            self.sim.time_ticks,
            self.sim.coin_counter
        );
    }

    fn to_menu(&mut self, ui: &mut impl UiLayer) {
        self.sim.paused = false;
        ui.set_game_over_visible(false);
        ui.set_menu_visible(true);
        self.phase = GamePhase::Menu;
    }

    fn load_failed(&mut self, error: LevelError, ui: &mut impl UiLayer) {
        log::error!("{error}");
        let message = error.to_string();
        ui.show_error(&message);
        ui.set_menu_visible(true);
        self.last_error = Some(message);
        self.phase = GamePhase::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::HudModel;
    use glam::Vec2;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_level(dir: &Path, id: u32, rows: u32, columns: u32, trees: &[(u32, u32)]) {
        let mut img = RgbaImage::new(columns, rows);
        for &(row, col) in trees {
            img.put_pixel(col, row, Rgba([0, 90, 0, 255]));
        }
        img.save(dir.join(format!("{id}.level.png"))).unwrap();
        std::fs::write(
            dir.join(format!("{id}.metadata.json")),
            format!(r#"{{"nb_rows": {rows}, "nb_columns": {columns}}}"#),
        )
        .unwrap();
    }

    /// Controller over a temp level directory holding level 1
    fn setup(trees: &[(u32, u32)]) -> (TempDir, GameController, HudModel) {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 1, 40, 20, trees);
        let settings = Settings {
            levels_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let controller = GameController::new(&settings, 1234);
        (dir, controller, HudModel::default())
    }

    /// Tick until the run ends
    fn run_until_crash(controller: &mut GameController, hud: &mut HudModel) {
        for _ in 0..10_000 {
            controller.advance(hud);
            if controller.phase() != GamePhase::Playing {
                return;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_start_from_menu() {
        let (_dir, mut controller, mut hud) = setup(&[(3, 2)]);
        assert_eq!(controller.phase(), GamePhase::Menu);
        assert!(controller.snapshot().is_none());

        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
        assert!(!hud.menu_visible);
        assert!(hud.hud_visible);
        assert_eq!(hud.coin_label, "Coins: 0");
        assert_eq!(controller.sim().trees.len(), 1);
        assert!(controller.snapshot().is_some());
    }

    #[test]
    fn test_start_with_missing_level_stays_in_menu() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.set_level(5);
        controller.handle_intent(Intent::Start, &mut hud);

        assert_eq!(controller.phase(), GamePhase::Menu);
        assert!(hud.menu_visible);
        assert!(!hud.hud_visible);
        assert!(hud.error.as_deref().is_some_and(|e| e.contains("5.level.png")));
        assert!(controller.last_error().is_some());
    }

    #[test]
    fn test_intents_outside_their_phase_are_ignored() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        let speed = controller.sim().speed;
        controller.handle_intent(Intent::Trick, &mut hud);
        controller.handle_intent(Intent::Replay, &mut hud);
        controller.handle_intent(Intent::ToMenu, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Menu);
        assert_eq!(controller.sim().speed, speed);

        controller.handle_intent(Intent::Start, &mut hud);
        controller.handle_intent(Intent::Quit, &mut hud);
        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_trick_while_playing() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        controller.sim_mut().speed = Vec2::new(0.3, 1.0);
        controller.handle_intent(Intent::Trick, &mut hud);
        let speed = controller.sim().speed;
        assert!((speed.x + 0.2).abs() < 1e-6);
        assert!((speed.y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_quit_and_window_close() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Quit, &mut hud);
        assert!(!controller.is_running());

        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        controller.handle_intent(Intent::WindowClosed, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Terminated);
    }

    #[test]
    fn test_off_the_edge_ends_the_run() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        run_until_crash(&mut controller, &mut hud);

        // Initial speed is rightward, so the skier leaves on the right
        assert_eq!(controller.phase(), GamePhase::GameOver);
        assert_eq!(controller.last_crash(), Some(Crash::RightEdge));
        assert!(controller.sim().paused);
        assert!(!hud.hud_visible);
        assert!(hud.game_over_visible);
    }

    #[test]
    fn test_tree_collision_end_to_end() {
        // One tree at column 2, row 3: world (50, 70)
        let (_dir, mut controller, mut hud) = setup(&[(3, 2)]);
        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(controller.sim().trees[0].pos, Vec2::new(50.0, 70.0));

        // Drop the skier above the tree, heading straight down
        let sim = controller.sim_mut();
        sim.player.set_pos(Vec2::new(50.0, 0.0));
        sim.speed.x = 0.0;

        run_until_crash(&mut controller, &mut hud);
        assert_eq!(controller.phase(), GamePhase::GameOver);
        assert_eq!(controller.last_crash(), Some(Crash::Tree { index: 0 }));

        let coin_label = hud.coin_label.clone();
        let speed_label = hud.speed_label.clone();
        let updates = hud.label_updates;
        let pos = controller.sim().player.pos();
        for _ in 0..10 {
            controller.advance(&mut hud);
        }
        assert_eq!(hud.label_updates, updates);
        assert_eq!(hud.coin_label, coin_label);
        assert_eq!(hud.speed_label, speed_label);
        assert_eq!(controller.sim().player.pos(), pos);
        // Still drawable behind the game-over panel
        assert!(controller.snapshot().is_some());
    }

    #[test]
    fn test_replay_starts_a_fresh_run() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        run_until_crash(&mut controller, &mut hud);
        controller.sim_mut().coin_counter = 3;

        controller.handle_intent(Intent::Replay, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
        assert!(!controller.sim().paused);
        assert_eq!(controller.sim().coin_counter, 0);
        assert_eq!(controller.sim().time_ticks, 0);
        assert_eq!(controller.last_crash(), None);
        assert!(!hud.game_over_visible);
        assert!(hud.hud_visible);
    }

    #[test]
    fn test_replay_with_missing_level_returns_to_menu() {
        let (dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        run_until_crash(&mut controller, &mut hud);

        std::fs::remove_file(dir.path().join("1.metadata.json")).unwrap();
        controller.handle_intent(Intent::Replay, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Menu);
        assert!(hud.menu_visible);
        assert!(!hud.game_over_visible);
        assert!(hud.error.is_some());
    }

    #[test]
    fn test_game_over_to_menu() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        run_until_crash(&mut controller, &mut hud);

        controller.handle_intent(Intent::ToMenu, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Menu);
        assert!(!controller.sim().paused);
        assert!(hud.menu_visible);
        assert!(!hud.game_over_visible);
        assert!(controller.snapshot().is_none());

        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_error_cleared_once_the_level_loads() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            levels_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut controller = GameController::new(&settings, 1234);
        let mut hud = HudModel::default();

        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Menu);
        assert!(hud.error.is_some());

        write_level(dir.path(), 1, 40, 20, &[]);
        controller.handle_intent(Intent::Start, &mut hud);
        controller.advance(&mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
        assert_eq!(controller.last_error(), None);
        assert_eq!(hud.error, None);
    }

    #[test]
    fn test_replay_clears_error() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        run_until_crash(&mut controller, &mut hud);

        hud.show_error("stale");
        controller.handle_intent(Intent::Replay, &mut hud);
        assert_eq!(controller.phase(), GamePhase::Playing);
        assert_eq!(hud.error, None);
    }

    #[test]
    fn test_hud_labels_follow_the_run() {
        let (_dir, mut controller, mut hud) = setup(&[]);
        controller.handle_intent(Intent::Start, &mut hud);
        assert_eq!(hud.speed_label, "Speed: 0.0");
        let updates = hud.label_updates;

        // Speed 4.005 after the tick: 4.005 * sqrt(2) = 5.66 -> 5.7
        controller.advance(&mut hud);
        assert_eq!(hud.speed_label, "Speed: 5.7");
        assert_eq!(hud.coin_label, "Coins: 0");
        assert!(hud.label_updates > updates);

        // Put a coin right where the skier lands next tick
        let sim = controller.sim_mut();
        let next = sim.player.pos() + sim.speed;
        sim.coins.push(crate::sim::Coin::new(next.x, next.y));
        controller.advance(&mut hud);
        assert_eq!(controller.sim().coin_counter, 1);
        assert_eq!(hud.coin_label, "Coins: 1");
    }
}
