//! The per-game console facade
//!
//! Bundles the pad, speaker, pacer, clock and RNG behind the handful of
//! calls a game loop actually makes, so game code never names the board
//! traits. One [`Console`] lives for the whole game.
//!
//! Display output is deliberately not in here: games own their
//! [`FrameBuffer`](crate::FrameBuffer) and transport directly, since
//! framebuffer size and format are per-game decisions.

use embedded_hal::delay::DelayNs;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::buttons::{ButtonSampler, Buttons, Pad};
use crate::pacer::FramePacer;
use crate::time::Clock;
use crate::tone::{Note, Speaker, ToneChannel};

/// Duration of the hotkey feedback beeps.
const BEEP_MS: u32 = 100;

/// Smallest and largest frame rates the hotkeys cycle through.
const FPS_STEP: u16 = 5;
const FPS_MIN: u16 = 5;
const FPS_MAX: u16 = 120;

pub struct Console<S, C, K, D> {
    pad: Pad,
    sampler: S,
    speaker: Speaker<C>,
    pacer: FramePacer,
    clock: K,
    delay: D,
    rng: SmallRng,
}

impl<S, C, K, D> Console<S, C, K, D>
where
    S: ButtonSampler,
    C: ToneChannel,
    K: Clock,
    D: DelayNs,
{
    /// Build a console over the board's peripherals. `seed` feeds the
    /// game RNG; boards usually pass a free-running counter read at
    /// boot.
    pub fn new(sampler: S, channel: C, clock: K, delay: D, seed: u64) -> Self {
        Self {
            pad: Pad::new(),
            sampler,
            speaker: Speaker::new(channel),
            pacer: FramePacer::new(),
            clock,
            delay,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sample the buttons and rotate the pad history. Call exactly once
    /// per frame, before any edge queries.
    pub fn update(&mut self) -> Buttons {
        let sample = self.sampler.sample();
        self.pad.update(sample)
    }

    pub fn pressed(&self, btn: Buttons) -> bool {
        self.pad.pressed(btn)
    }

    pub fn just_pressed(&self, btn: Buttons) -> bool {
        self.pad.just_pressed(btn)
    }

    pub fn just_released(&self, btn: Buttons) -> bool {
        self.pad.just_released(btn)
    }

    pub fn pad(&self) -> &Pad {
        &self.pad
    }

    /// Blocking sound effect at the current volume.
    pub fn play_note(&mut self, note: Note, dur_ms: u32, rest_ms: u32) -> Result<(), C::Error> {
        self.speaker.play_note(note, dur_ms, rest_ms, &mut self.delay)
    }

    /// Blocking raw-frequency effect at the current volume.
    pub fn play_frequency(
        &mut self,
        freq_hz: u16,
        dur_ms: u32,
        rest_ms: u32,
    ) -> Result<(), C::Error> {
        self.speaker
            .play_frequency(freq_hz, dur_ms, rest_ms, &mut self.delay)
    }

    pub fn volume(&self) -> u8 {
        self.speaker.volume()
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.speaker.set_volume(volume);
    }

    pub fn frame_rate(&self) -> u16 {
        self.pacer.frame_rate()
    }

    pub fn set_frame_rate(&mut self, fps: u16) {
        self.pacer.set_frame_rate(fps);
    }

    /// Uniform random integer in `low..=high`. A degenerate range
    /// returns `low`.
    pub fn random(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Sleep off the rest of the frame period. Returns the milliseconds
    /// slept.
    pub fn wait_for_next_frame(&mut self) -> u32 {
        self.pacer.wait_for_next_frame(&self.clock, &mut self.delay)
    }

    /// Standard volume chords: B held plus Up/Down steps the volume and
    /// beeps at the new level. Returns whether the volume changed.
    ///
    /// Call after [`update`](Self::update), before game input handling,
    /// and skip the frame's own B handling when this returns true.
    pub fn volume_hotkeys(&mut self) -> Result<bool, C::Error> {
        if self.pad.pressed(Buttons::B) && self.pad.just_pressed(Buttons::UP) {
            let v = self.speaker.volume().saturating_add(1);
            self.speaker.set_volume(v);
            self.play_note(Note::C4, BEEP_MS, 0)?;
            return Ok(true);
        }
        if self.pad.pressed(Buttons::B) && self.pad.just_pressed(Buttons::DOWN) {
            let v = self.speaker.volume().saturating_sub(1);
            self.speaker.set_volume(v);
            self.play_note(Note::D4, BEEP_MS, 0)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Standard frame-rate chords: Right alone steps the rate up by 5,
    /// B plus Right steps it down, both wrapping at the 5..=120 ends.
    /// The chord is checked before the bare press so holding B never
    /// triggers the step up. Returns whether the rate changed.
    pub fn frame_rate_hotkeys(&mut self) -> Result<bool, C::Error> {
        if self.pad.pressed(Buttons::B) && self.pad.just_pressed(Buttons::RIGHT) {
            let fps = self.pacer.frame_rate();
            let next = if fps <= FPS_MIN { FPS_MAX } else { fps - FPS_STEP };
            self.pacer.set_frame_rate(next);
            self.play_note(Note::F4, BEEP_MS, 0)?;
            return Ok(true);
        }
        if self.pad.just_pressed(Buttons::RIGHT) {
            let fps = self.pacer.frame_rate();
            let next = if fps >= FPS_MAX { FPS_MIN } else { fps + FPS_STEP };
            self.pacer.set_frame_rate(next);
            self.play_note(Note::E4, BEEP_MS, 0)?;
            return Ok(true);
        }
        Ok(false)
    }
}
