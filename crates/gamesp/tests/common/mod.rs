//! Shared fakes for the integration tests.
//!
//! Everything hardware-shaped in the runtime sits behind a trait, so the
//! tests drive the whole stack with these in-memory stand-ins and assert
//! on the traces they record.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use gamesp::{AdcReader, Clock, OneShotTimer, ToneChannel};

/// One observable write to the shared audio pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Start {
        source: &'static str,
        freq_hz: u16,
        duty: u16,
    },
    Stop {
        source: &'static str,
    },
}

/// The single physical buzzer pin, shared by every [`PinChannel`]
/// handle. Records the full write sequence so tests can assert on
/// ordering, including last-writer-wins contention.
#[derive(Default)]
pub struct SharedPin {
    pub events: RefCell<Vec<AudioEvent>>,
}

impl SharedPin {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn take_events(&self) -> Vec<AudioEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// A tone-channel handle onto the shared pin, tagged with who holds it.
pub struct PinChannel {
    pin: Rc<SharedPin>,
    source: &'static str,
}

impl PinChannel {
    pub fn new(pin: &Rc<SharedPin>, source: &'static str) -> Self {
        Self {
            pin: Rc::clone(pin),
            source,
        }
    }
}

impl ToneChannel for PinChannel {
    type Error = Infallible;

    fn start_tone(&mut self, freq_hz: u16, duty: u16) -> Result<(), Self::Error> {
        self.pin.events.borrow_mut().push(AudioEvent::Start {
            source: self.source,
            freq_hz,
            duty,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.pin
            .events
            .borrow_mut()
            .push(AudioEvent::Stop {
                source: self.source,
            });
        Ok(())
    }
}

#[derive(Default)]
pub struct TimerState {
    /// Most recent pending arm, cleared by cancel.
    pub armed_ms: Option<u32>,
    /// Every arm ever requested, in order.
    pub arm_log: Vec<u32>,
    pub cancels: usize,
}

/// One-shot timer that records arms instead of scheduling anything; the
/// test plays the ISR by calling `on_timer_fire` itself.
pub struct TestTimer(pub Rc<RefCell<TimerState>>);

impl TestTimer {
    pub fn new() -> (Self, Rc<RefCell<TimerState>>) {
        let state = Rc::new(RefCell::new(TimerState::default()));
        (Self(Rc::clone(&state)), state)
    }
}

impl OneShotTimer for TestTimer {
    type Error = Infallible;

    fn arm_ms(&mut self, ms: u32) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.armed_ms = Some(ms);
        state.arm_log.push(ms);
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.armed_ms = None;
        state.cancels += 1;
        Ok(())
    }
}

/// Hand-advanced clock. Clones share the same instant.
#[derive(Clone, Default)]
pub struct FakeClock(Rc<RefCell<u64>>);

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        *self.0.borrow_mut() += ms;
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        *self.0.borrow()
    }
}

/// Delay provider wired to a [`FakeClock`]: sleeping advances the shared
/// instant and records every millisecond-level sleep.
pub struct FakeDelay {
    clock: FakeClock,
    pub slept_ms: Vec<u32>,
}

impl FakeDelay {
    pub fn new(clock: &FakeClock) -> Self {
        Self {
            clock: clock.clone(),
            slept_ms: Vec::new(),
        }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.clock.0.borrow_mut() += ns as u64 / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.slept_ms.push(ms);
        *self.clock.0.borrow_mut() += ms as u64;
    }
}

/// ADC fed from a canned sample script; the last sample repeats forever.
pub struct ScriptedAdc {
    samples: Vec<u16>,
    pos: usize,
}

impl ScriptedAdc {
    pub fn new(samples: impl Into<Vec<u16>>) -> Self {
        Self {
            samples: samples.into(),
            pos: 0,
        }
    }
}

impl AdcReader for ScriptedAdc {
    fn read(&mut self) -> u16 {
        let sample = self
            .samples
            .get(self.pos)
            .or_else(|| self.samples.last())
            .copied()
            .unwrap_or(0);
        self.pos += 1;
        sample
    }
}
