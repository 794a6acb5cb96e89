//! Platform abstraction layer
//!
//! Only timing lives here: the frame-rate governor is the one place the game
//! loop is allowed to sleep.

use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a target frame rate and measures frame deltas
#[derive(Debug)]
pub struct FrameClock {
    /// Minimum frame duration; `None` when uncapped
    frame_budget: Option<Duration>,
    last: Instant,
}

impl FrameClock {
    /// `frame_rate == 0` disables the cap
    pub fn new(frame_rate: u32) -> Self {
        let frame_budget = (frame_rate > 0).then(|| Duration::from_secs(1) / frame_rate);
        Self {
            frame_budget,
            last: Instant::now(),
        }
    }

    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    /// Sleep out the rest of the frame budget, then return the seconds elapsed
    /// since the previous call
    pub fn tick(&mut self) -> f32 {
        if let Some(budget) = self.frame_budget {
            let spent = self.last.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}
