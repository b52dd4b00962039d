//! Platform runtime for the gamesp handheld boards.
//!
//! Every game on these boards is a fixed-timestep loop over a small object
//! list; this crate is the part they all share. Per frame the loop reads
//! the pad, mutates the framebuffer, flushes it through the
//! `gamesp-display` transport and sleeps off the residual frame time:
//!
//! ```text
//! Game loop (foreground)                    Hardware timer (ISR)
//!   console.update()                          sequencer.on_timer_fire()
//!   ... game logic draws into FrameBuffer
//!   display.flush(fb.as_bytes())
//!   console.wait_for_next_frame()
//! ```
//!
//! The background music [`Sequencer`] is the only asynchronous piece: it
//! re-arms its own one-shot timer from inside the callback and never
//! touches the display or the pad. The foreground [`Speaker`] and the
//! sequencer hold distinct [`ToneChannel`] handles multiplexed onto the
//! same physical pin; whichever wrote last owns the pin until its own
//! duration expires (see the module docs in [`sequencer`]).
//!
//! Hardware is reached exclusively through traits: `embedded-hal` where
//! it has one ([`embedded_hal::delay::DelayNs`], pins, buses) and small
//! crate-local ones where it does not ([`AdcReader`], [`ToneChannel`],
//! [`OneShotTimer`], [`Clock`]). The whole runtime runs headless in
//! tests.

#![cfg_attr(not(test), no_std)]

pub mod buttons;
pub mod console;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod pacer;
pub mod sequencer;
pub mod time;
pub mod tone;

pub use buttons::{AdcReader, Buttons, ButtonSampler, LadderPad, Pad, PinPad, ThresholdTable};
pub use console::Console;
pub use framebuffer::{color565, FrameBuffer, PixelFormat};
pub use pacer::FramePacer;
pub use sequencer::{OneShotTimer, Sequencer};
pub use time::Clock;
pub use tone::{Note, Speaker, ToneChannel, MAX_VOLUME};
