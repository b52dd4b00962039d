//! End-to-end input decoding, from raw ADC samples to edge queries.

mod common;

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use common::{FakeClock, ScriptedAdc};
use embedded_hal::digital::{ErrorType, InputPin};
use gamesp::buttons::LADDER_V1;
use gamesp::{ButtonSampler, Buttons, LadderPad, Pad, PinPad};
use proptest::prelude::*;

/// Active-low pin driven by the test: `true` means pressed.
#[derive(Clone, Default)]
struct FakePin(Rc<Cell<bool>>);

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

#[test]
fn chord_script_produces_press_and_release_edges() {
    // Idle, A pressed and held, A+B chord, all released.
    let adc = ScriptedAdc::new([0u16, 700, 700, 850, 0]);
    let mut ladder = LadderPad::new(adc, LADDER_V1);
    let mut pad = Pad::new();

    pad.update(ladder.sample());
    assert_eq!(pad.current(), Buttons::empty());

    pad.update(ladder.sample());
    assert!(pad.just_pressed(Buttons::A));

    pad.update(ladder.sample());
    assert!(pad.pressed(Buttons::A));
    assert!(!pad.just_pressed(Buttons::A));

    pad.update(ladder.sample());
    assert!(pad.just_pressed(Buttons::B));
    assert!(pad.pressed(Buttons::A));

    pad.update(ladder.sample());
    assert!(pad.just_released(Buttons::A));
    assert!(pad.just_released(Buttons::B));
}

#[test]
fn pin_pad_ignores_bounces_inside_the_guard_window() {
    let clock = FakeClock::new();
    let a = FakePin::default();
    let mut pad = PinPad::new(
        FakePin::default(),
        FakePin::default(),
        FakePin::default(),
        FakePin::default(),
        a.clone(),
        FakePin::default(),
        clock.clone(),
    );

    // Past the initial guard period, a clean press registers at once.
    clock.advance_ms(10);
    a.0.set(true);
    assert_eq!(pad.sample(), Buttons::A);

    // Contact bounce 2 ms after the press: the released reading and the
    // re-pressed reading both land inside the 5 ms guard and are ignored.
    clock.advance_ms(2);
    a.0.set(false);
    assert_eq!(pad.sample(), Buttons::A);
    a.0.set(true);
    assert_eq!(pad.sample(), Buttons::A);

    // Once the guard has elapsed the release goes through.
    clock.advance_ms(5);
    a.0.set(false);
    assert_eq!(pad.sample(), Buttons::empty());
}

#[test]
fn pin_pad_guard_period_is_configurable() {
    let clock = FakeClock::new();
    let b = FakePin::default();
    let mut pad = PinPad::new(
        FakePin::default(),
        FakePin::default(),
        FakePin::default(),
        FakePin::default(),
        FakePin::default(),
        b.clone(),
        clock.clone(),
    )
    .with_guard_ms(20);

    clock.advance_ms(30);
    b.0.set(true);
    assert_eq!(pad.sample(), Buttons::B);

    clock.advance_ms(19);
    b.0.set(false);
    assert_eq!(pad.sample(), Buttons::B);
    clock.advance_ms(1);
    assert_eq!(pad.sample(), Buttons::empty());
}

fn mask(bits: u8) -> Buttons {
    Buttons::from_bits_truncate(bits)
}

proptest! {
    // The binary search must agree with a plain linear scan over every
    // reachable sample, including values past the table.
    #[test]
    fn decode_matches_linear_scan(sample in 0u16..2048) {
        let linear = LADDER_V1
            .0
            .iter()
            .find(|b| sample >= b.lo && sample < b.hi)
            .map(|b| b.buttons)
            .unwrap_or(Buttons::empty());
        prop_assert_eq!(LADDER_V1.decode(sample), linear);
    }

    #[test]
    fn edge_queries_are_consistent(prev: u8, cur: u8, probe: u8) {
        let probe = mask(probe);
        prop_assume!(!probe.is_empty());

        let mut pad = Pad::new();
        pad.update(mask(prev));
        pad.update(mask(cur));

        if pad.just_pressed(probe) {
            prop_assert!(pad.pressed(probe));
            prop_assert!(!pad.just_released(probe));
        }
        if pad.just_released(probe) {
            prop_assert!(!pad.just_pressed(probe));
        }
    }
}
