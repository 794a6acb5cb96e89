//! Frame loop
//!
//! One frame: wait for the frame budget, poll input, route intents, update
//! the UI, advance the run, render, present. Everything runs on the calling
//! thread.

use crate::controller::GameController;
use crate::input::{InputSource, Intent};
use crate::platform::FrameClock;
use crate::render::Renderer;
use crate::settings::Settings;
use crate::ui::UiLayer;

/// Engine context: the controller plus its collaborators
pub struct Engine<U, R, I> {
    pub controller: GameController,
    pub ui: U,
    pub renderer: R,
    pub input: I,
    clock: FrameClock,
    intents: Vec<Intent>,
    frames: u64,
}

impl<U: UiLayer, R: Renderer, I: InputSource> Engine<U, R, I> {
    pub fn new(settings: &Settings, seed: u64, ui: U, renderer: R, input: I) -> Self {
        Self {
            controller: GameController::new(settings, seed),
            ui,
            renderer,
            input,
            clock: FrameClock::new(settings.frame_rate),
            intents: Vec::new(),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame
    pub fn frame(&mut self) {
        let dt = self.clock.tick();

        self.input.poll(&mut self.intents);
        for intent in self.intents.drain(..) {
            self.controller.handle_intent(intent, &mut self.ui);
            if !self.controller.is_running() {
                break;
            }
        }

        self.ui.update(dt);
        self.controller.advance(&mut self.ui);

        if let Some(snapshot) = self.controller.snapshot() {
            self.renderer.draw(&snapshot);
        }
        self.renderer.present();
        self.frames += 1;
    }

    /// Run frames until quit
    pub fn run(&mut self) {
        log::info!("Entering frame loop");
        while self.controller.is_running() {
            self.frame();
        }
        log::info!("Frame loop stopped after {} frames", self.frames);
    }
}
