//! Button decoding and per-frame edge detection
//!
//! Two board families exist. The resistor-ladder boards wire all six
//! buttons in series onto one analog input; every legal chord produces a
//! distinct voltage, decoded through a [`ThresholdTable`]. The other
//! boards give each button its own GPIO, read active-low with a short
//! debounce guard.
//!
//! Either way a [`Pad`] keeps exactly one frame of history, so
//! [`Pad::update`] must run exactly once per logical frame or edge
//! detection breaks.

use bitflags::bitflags;
use embedded_hal::digital::InputPin;

use crate::time::Clock;

bitflags! {
    /// Pressed-button mask. Bit positions are the board wire values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const UP = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const DOWN = 1 << 4;
        const A = 1 << 5;
        const B = 1 << 6;
    }
}

/// One decoded range of the analog sample domain: samples in `lo..hi`
/// decode to `buttons`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdBin {
    pub lo: u16,
    pub hi: u16,
    pub buttons: Buttons,
}

const fn bin(lo: u16, hi: u16, buttons: Buttons) -> ThresholdBin {
    ThresholdBin { lo, hi, buttons }
}

/// Ordered, non-overlapping threshold bins over the raw ADC domain.
///
/// Decoding is a binary search; a sample outside every bin decodes to no
/// buttons, never an error.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable(pub &'static [ThresholdBin]);

impl ThresholdTable {
    /// Decode one raw sample.
    pub fn decode(&self, sample: u16) -> Buttons {
        let bins = self.0;
        let mut lo = 0usize;
        let mut hi = bins.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let b = &bins[mid];
            if sample < b.lo {
                hi = mid;
            } else if sample >= b.hi {
                lo = mid + 1;
            } else {
                return b.buttons;
            }
        }
        Buttons::empty()
    }

    /// True when the bins are sorted and disjoint. Checked by tests; the
    /// decode search assumes it.
    pub fn is_well_formed(&self) -> bool {
        self.0.windows(2).all(|w| w[0].hi <= w[1].lo) && self.0.iter().all(|b| b.lo < b.hi)
    }
}

/// Chord thresholds for the 10-bit ladder on the v1 boards
/// (3.3V - 9K - Up - 9K - Left - 12K - Right - 9K - Down - 9K - A - 12K - B - 9K - GND).
/// Resistor values keep at least 10 counts of slack between neighbouring
/// chords; anything below the first bin reads as no contact.
pub const LADDER_V1: ThresholdTable = ThresholdTable(&[
    bin(69, 177, Buttons::UP),
    bin(177, 242, Buttons::UP.union(Buttons::DOWN)),
    bin(242, 278, Buttons::LEFT),
    bin(278, 362, Buttons::UP.union(Buttons::A)),
    bin(362, 444, Buttons::RIGHT),
    bin(444, 486, Buttons::LEFT.union(Buttons::A)),
    bin(486, 532, Buttons::UP.union(Buttons::B)),
    bin(532, 570, Buttons::DOWN),
    bin(570, 616, Buttons::RIGHT.union(Buttons::A)),
    bin(616, 661, Buttons::DOWN.union(Buttons::A)),
    bin(661, 684, Buttons::LEFT.union(Buttons::B)),
    bin(684, 737, Buttons::A),
    bin(737, 806, Buttons::RIGHT.union(Buttons::B)),
    bin(806, 841, Buttons::DOWN.union(Buttons::B)),
    bin(841, 871, Buttons::A.union(Buttons::B)),
    bin(871, 1024, Buttons::B),
]);

/// Raw analog sampling of the shared button line. The implementation is
/// responsible for any mux/select pins the board needs before a read.
pub trait AdcReader {
    fn read(&mut self) -> u16;
}

/// Instantaneous button sampling, one call per frame.
pub trait ButtonSampler {
    /// Decode the buttons held "at this instant".
    fn sample(&mut self) -> Buttons;
}

/// Sampler for the shared-analog (resistor ladder) boards.
///
/// No debounce beyond the pad's one-frame history: the ladder voltage is
/// already settled by the time the ADC converts.
pub struct LadderPad<A: AdcReader> {
    adc: A,
    table: ThresholdTable,
}

impl<A: AdcReader> LadderPad<A> {
    pub fn new(adc: A, table: ThresholdTable) -> Self {
        Self { adc, table }
    }
}

impl<A: AdcReader> ButtonSampler for LadderPad<A> {
    fn sample(&mut self) -> Buttons {
        self.table.decode(self.adc.read())
    }
}

/// Debounce guard period for the direct-GPIO boards.
pub const DEBOUNCE_MS: u64 = 5;

/// One debounced active-low pin: a state change within the guard period
/// of the previous change is ignored and the prior stable state reported.
struct Debounced<P> {
    pin: P,
    stable: bool,
    changed_at_ms: u64,
}

impl<P: InputPin> Debounced<P> {
    fn new(pin: P) -> Self {
        Self {
            pin,
            stable: false,
            changed_at_ms: 0,
        }
    }

    fn sample(&mut self, now_ms: u64, guard_ms: u64) -> bool {
        let raw = matches!(self.pin.is_low(), Ok(true));
        if raw != self.stable && now_ms.wrapping_sub(self.changed_at_ms) >= guard_ms {
            self.stable = raw;
            self.changed_at_ms = now_ms;
        }
        self.stable
    }
}

/// Sampler for boards with one GPIO per button, pulled high, pressed low.
pub struct PinPad<P, C> {
    up: Debounced<P>,
    down: Debounced<P>,
    left: Debounced<P>,
    right: Debounced<P>,
    a: Debounced<P>,
    b: Debounced<P>,
    clock: C,
    guard_ms: u64,
}

impl<P: InputPin, C: Clock> PinPad<P, C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(up: P, down: P, left: P, right: P, a: P, b: P, clock: C) -> Self {
        Self {
            up: Debounced::new(up),
            down: Debounced::new(down),
            left: Debounced::new(left),
            right: Debounced::new(right),
            a: Debounced::new(a),
            b: Debounced::new(b),
            clock,
            guard_ms: DEBOUNCE_MS,
        }
    }

    /// Override the debounce guard period.
    pub fn with_guard_ms(mut self, guard_ms: u64) -> Self {
        self.guard_ms = guard_ms;
        self
    }
}

impl<P: InputPin, C: Clock> ButtonSampler for PinPad<P, C> {
    fn sample(&mut self) -> Buttons {
        let now = self.clock.now_ms();
        let g = self.guard_ms;
        let mut out = Buttons::empty();
        for (btn, pin) in [
            (Buttons::UP, &mut self.up),
            (Buttons::DOWN, &mut self.down),
            (Buttons::LEFT, &mut self.left),
            (Buttons::RIGHT, &mut self.right),
            (Buttons::A, &mut self.a),
            (Buttons::B, &mut self.b),
        ] {
            if pin.sample(now, g) {
                out |= btn;
            }
        }
        out
    }
}

/// One frame of button history with edge queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pad {
    current: Buttons,
    previous: Buttons,
}

impl Pad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate the history: `previous <- current`, `current <- sample`.
    /// Call exactly once per logical frame.
    pub fn update(&mut self, sample: Buttons) -> Buttons {
        self.previous = self.current;
        self.current = sample;
        self.current
    }

    /// Any of `btn` held this frame.
    pub fn pressed(&self, btn: Buttons) -> bool {
        self.current.intersects(btn)
    }

    /// Any of `btn` held this frame but not the previous one.
    pub fn just_pressed(&self, btn: Buttons) -> bool {
        self.current.intersects(btn) && !self.previous.intersects(btn)
    }

    /// Any of `btn` held the previous frame but not this one.
    pub fn just_released(&self, btn: Buttons) -> bool {
        self.previous.intersects(btn) && !self.current.intersects(btn)
    }

    pub fn current(&self) -> Buttons {
        self.current
    }

    pub fn previous(&self) -> Buttons {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_table_is_well_formed() {
        assert!(LADDER_V1.is_well_formed());
    }

    #[test]
    fn decode_hits_known_chords() {
        // Spot values from the shipped ladder calibration.
        assert_eq!(LADDER_V1.decode(100), Buttons::UP);
        assert_eq!(LADDER_V1.decode(300), Buttons::UP | Buttons::A);
        assert_eq!(LADDER_V1.decode(400), Buttons::RIGHT);
        assert_eq!(LADDER_V1.decode(550), Buttons::DOWN);
        assert_eq!(LADDER_V1.decode(700), Buttons::A);
        assert_eq!(LADDER_V1.decode(850), Buttons::A | Buttons::B);
        assert_eq!(LADDER_V1.decode(1000), Buttons::B);
    }

    #[test]
    fn decode_misses_to_empty() {
        assert_eq!(LADDER_V1.decode(0), Buttons::empty());
        assert_eq!(LADDER_V1.decode(68), Buttons::empty());
        assert_eq!(LADDER_V1.decode(1024), Buttons::empty());
        assert_eq!(LADDER_V1.decode(u16::MAX), Buttons::empty());
    }

    #[test]
    fn bin_edges_are_half_open() {
        assert_eq!(LADDER_V1.decode(69), Buttons::UP);
        assert_eq!(LADDER_V1.decode(176), Buttons::UP);
        assert_eq!(LADDER_V1.decode(177), Buttons::UP | Buttons::DOWN);
        assert_eq!(LADDER_V1.decode(870), Buttons::A | Buttons::B);
        assert_eq!(LADDER_V1.decode(871), Buttons::B);
    }

    #[test]
    fn held_button_fires_one_press_and_one_release_edge() {
        let mut pad = Pad::new();

        pad.update(Buttons::A);
        assert!(pad.just_pressed(Buttons::A));

        pad.update(Buttons::A);
        assert!(pad.pressed(Buttons::A));
        assert!(!pad.just_pressed(Buttons::A));

        pad.update(Buttons::empty());
        assert!(pad.just_released(Buttons::A));

        pad.update(Buttons::empty());
        assert!(!pad.just_released(Buttons::A));
    }
}
