//! Frame pacing
//!
//! Games run a fixed timestep by sleeping off whatever is left of the
//! frame period after logic and flush. There is no drift compensation:
//! an overrun frame returns immediately and the next period starts from
//! the current instant, so one slow frame never causes a catch-up burst.

use embedded_hal::delay::DelayNs;

use crate::time::Clock;

/// Frame rate the console boots with.
pub const DEFAULT_FRAME_RATE: u16 = 30;

/// Tracks the end of the previous frame and sleeps until the next one.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    frame_rate: u16,
    last_ms: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePacer {
    pub fn new() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            last_ms: 0,
        }
    }

    pub fn frame_rate(&self) -> u16 {
        self.frame_rate
    }

    /// Set the target frame rate, clamped to 1..=120 fps.
    pub fn set_frame_rate(&mut self, fps: u16) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Sleep off the rest of the current frame period, measured from the
    /// end of the previous call. Returns the milliseconds actually slept.
    pub fn wait_for_next_frame<C: Clock, D: DelayNs>(&mut self, clock: &C, delay: &mut D) -> u32 {
        // Integer period, same truncation as the shipped loops: 30 fps
        // paces at 33 ms, not 33.3.
        let period = (1000 / self.frame_rate) as u64;
        let elapsed = clock.now_ms().saturating_sub(self.last_ms);
        let slack = period.saturating_sub(elapsed) as u32;
        if slack > 0 {
            delay.delay_ms(slack);
        }
        self.last_ms = clock.now_ms();
        slack
    }
}
