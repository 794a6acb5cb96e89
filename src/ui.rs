//! UI boundary
//!
//! The controller never touches widgets directly. It reports what should be
//! visible and what the HUD labels say through [`UiLayer`]; a widget toolkit
//! (or [`HudModel`], a retained copy of that state) sits on the other side.

use serde::{Deserialize, Serialize};

/// Everything the controller tells the UI
pub trait UiLayer {
    /// Title, Play and Quit buttons
    fn set_menu_visible(&mut self, visible: bool);
    /// In-game coin and speed labels
    fn set_hud_visible(&mut self, visible: bool);
    /// Game-over panel with Play Again and Menu buttons
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_coin_label(&mut self, text: &str);
    fn set_speed_label(&mut self, text: &str);
    /// A level failed to load
    fn show_error(&mut self, message: &str);
    /// Drop the load error once a level loads
    fn clear_error(&mut self);
    /// Per-frame update with wall-clock delta (seconds), for UI animation
    fn update(&mut self, _dt: f32) {}
}

/// HUD text for the coin counter
pub fn coin_label(coins: u32) -> String {
    format!("Coins: {coins}")
}

/// HUD text for the display speed, one decimal
pub fn speed_label(display_speed: f32) -> String {
    format!("Speed: {display_speed:.1}")
}

/// Retained UI state, for renderers that draw the UI themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudModel {
    pub menu_visible: bool,
    pub hud_visible: bool,
    pub game_over_visible: bool,
    pub coin_label: String,
    pub speed_label: String,
    pub error: Option<String>,
    /// Number of label writes since creation
    pub label_updates: u64,
    /// Seconds of UI time elapsed
    pub clock: f32,
}

impl Default for HudModel {
    fn default() -> Self {
        Self {
            menu_visible: true,
            hud_visible: false,
            game_over_visible: false,
            coin_label: coin_label(0),
            speed_label: speed_label(0.0),
            error: None,
            label_updates: 0,
            clock: 0.0,
        }
    }
}

impl UiLayer for HudModel {
    fn set_menu_visible(&mut self, visible: bool) {
        self.menu_visible = visible;
        if visible {
            log::debug!("Menu shown");
        }
    }

    fn set_hud_visible(&mut self, visible: bool) {
        self.hud_visible = visible;
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        self.game_over_visible = visible;
    }

    fn set_coin_label(&mut self, text: &str) {
        self.coin_label.clear();
        self.coin_label.push_str(text);
        self.label_updates += 1;
    }

    fn set_speed_label(&mut self, text: &str) {
        self.speed_label.clear();
        self.speed_label.push_str(text);
        self.label_updates += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn update(&mut self, dt: f32) {
        self.clock += dt;
    }
}
