//! Input boundary
//!
//! Device events (keys, UI buttons, window close) are mapped to [`Intent`]s
//! before they reach the controller.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A player or UI action, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Leave the menu and start a run
    Start,
    /// Quit from the menu
    Quit,
    /// Jump-turn during a run
    Trick,
    /// Play again from the game-over panel
    Replay,
    /// Back to the menu from the game-over panel
    ToMenu,
    /// Window closed; honored in every phase
    WindowClosed,
}

/// Keyboard keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

/// UI buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Quit,
    PlayAgain,
    Menu,
}

/// Raw events coming from the window / UI toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    KeyDown(Key),
    ButtonPressed(Button),
    CloseRequested,
}

impl DeviceEvent {
    pub fn intent(self) -> Option<Intent> {
        match self {
            DeviceEvent::KeyDown(Key::Space) => Some(Intent::Trick),
            DeviceEvent::KeyDown(Key::Other) => None,
            DeviceEvent::ButtonPressed(Button::Play) => Some(Intent::Start),
            DeviceEvent::ButtonPressed(Button::Quit) => Some(Intent::Quit),
            DeviceEvent::ButtonPressed(Button::PlayAgain) => Some(Intent::Replay),
            DeviceEvent::ButtonPressed(Button::Menu) => Some(Intent::ToMenu),
            DeviceEvent::CloseRequested => Some(Intent::WindowClosed),
        }
    }
}

/// Something that produces intents once per frame
pub trait InputSource {
    /// Append this frame's intents to `out`
    fn poll(&mut self, out: &mut Vec<Intent>);
}

/// Queue of device events, drained on poll
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DeviceEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: DeviceEvent) {
        self.events.push_back(event);
    }
}

impl InputSource for EventQueue {
    fn poll(&mut self, out: &mut Vec<Intent>) {
        out.extend(self.events.drain(..).filter_map(DeviceEvent::intent));
    }
}

/// Frame-indexed intents, for demos and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frame: u64,
    once: Vec<(u64, Intent)>,
    repeating: Vec<(u64, Intent)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `intent` on frame `frame` (0-based)
    pub fn at(mut self, frame: u64, intent: Intent) -> Self {
        self.once.push((frame, intent));
        self
    }

    /// Emit `intent` every `period` frames, starting at frame `period`
    pub fn every(mut self, period: u64, intent: Intent) -> Self {
        if period > 0 {
            self.repeating.push((period, intent));
        }
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<Intent>) {
        let frame = self.frame;
        out.extend(
            self.once
                .iter()
                .filter(|(at, _)| *at == frame)
                .map(|(_, intent)| *intent),
        );
        out.extend(
            self.repeating
                .iter()
                .filter(|(period, _)| frame > 0 && frame % period == 0)
                .map(|(_, intent)| *intent),
        );
        self.frame += 1;
    }
}
