//! Foreground tone playback
//!
//! Sound effects are played synchronously: start the carrier, busy-wait
//! the duration, stop, busy-wait the rest gap. Loudness is a PWM duty
//! cycle looked up per volume step; the steps are perceptual, not linear,
//! and step 0 is true silence (zero duty, carrier still running).

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

/// Loudest volume step. Steps run 0 (mute) through 6.
pub const MAX_VOLUME: u8 = 6;

/// Volume step the console boots with.
pub const DEFAULT_VOLUME: u8 = 4;

/// PWM duty per volume step, out of a 16-bit full scale.
pub const DUTY_BY_VOLUME: [u16; 7] = [0, 64, 192, 320, 640, 4480, 32768];

/// Duty cycle for a volume step. Steps past the top clamp to loudest.
pub fn duty_for_volume(volume: u8) -> u16 {
    DUTY_BY_VOLUME[volume.min(MAX_VOLUME) as usize]
}

/// Square-wave output channel, one physical pin.
///
/// The board layer maps this onto its PWM peripheral. Both the
/// foreground [`Speaker`] and the background sequencer drive the same
/// pin through separate handles; last writer wins.
pub trait ToneChannel {
    type Error: Debug;

    /// Start (or retune) the carrier at `freq_hz` with the given 16-bit
    /// duty cycle. Zero duty keeps the carrier running silently.
    fn start_tone(&mut self, freq_hz: u16, duty: u16) -> Result<(), Self::Error>;

    /// Kill the carrier.
    fn stop(&mut self) -> Result<(), Self::Error>;
}

impl<T: ToneChannel> ToneChannel for &mut T {
    type Error = T::Error;

    fn start_tone(&mut self, freq_hz: u16, duty: u16) -> Result<(), Self::Error> {
        (**self).start_tone(freq_hz, duty)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        (**self).stop()
    }
}

macro_rules! notes {
    ($($name:ident = $freq:expr),+ $(,)?) => {
        /// Pitches of the three playable octaves, C3 through D6.
        ///
        /// Song data stores a note as a 1-based index into this scale
        /// (see [`Note::token`]); frequencies are the usual equal
        /// temperament values rounded to whole hertz.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Note {
            $($name),+
        }

        impl Note {
            /// Every note, lowest first, in token order.
            pub const ALL: &'static [Note] = &[$(Note::$name),+];

            /// Fundamental frequency in hertz.
            pub fn freq_hz(self) -> u16 {
                match self {
                    $(Note::$name => $freq),+
                }
            }
        }
    };
}

notes! {
    C3 = 131, Cs3 = 139, D3 = 147, Ds3 = 156, E3 = 165, F3 = 175,
    Fs3 = 185, G3 = 196, Gs3 = 208, A3 = 220, B3 = 247,
    C4 = 262, D4 = 294, E4 = 330, F4 = 349, Fs4 = 370, G4 = 392,
    Gs4 = 415, A4 = 440, As4 = 466, B4 = 494,
    C5 = 523, Cs5 = 554, D5 = 587, Ds5 = 622, E5 = 659, F5 = 698,
    Fs5 = 740, G5 = 784, Gs5 = 831, A5 = 880, B5 = 988,
    C6 = 1047, Cs6 = 1109, D6 = 1175,
}

impl Note {
    /// 1-based index used by the song wire format. 0 is reserved for a
    /// rest and never maps to a note.
    pub fn token(self) -> i32 {
        self as i32 + 1
    }

    /// Reverse of [`Note::token`]; `None` for rests and out-of-scale
    /// values.
    pub fn from_token(token: i32) -> Option<Note> {
        if token < 1 {
            return None;
        }
        Note::ALL.get(token as usize - 1).copied()
    }
}

/// Blocking sound-effect player over a [`ToneChannel`].
pub struct Speaker<C> {
    channel: C,
    volume: u8,
}

impl<C: ToneChannel> Speaker<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            volume: DEFAULT_VOLUME,
        }
    }

    /// Current volume step.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Set the volume step, clamped to [`MAX_VOLUME`].
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Play `note` for `dur_ms`, then keep quiet for `rest_ms`. Blocks
    /// for the full `dur_ms + rest_ms`.
    pub fn play_note<D: DelayNs>(
        &mut self,
        note: Note,
        dur_ms: u32,
        rest_ms: u32,
        delay: &mut D,
    ) -> Result<(), C::Error> {
        self.play_frequency(note.freq_hz(), dur_ms, rest_ms, delay)
    }

    /// Play a raw frequency. A frequency of zero skips the carrier but
    /// still blocks for the full duration, so rhythm is preserved.
    pub fn play_frequency<D: DelayNs>(
        &mut self,
        freq_hz: u16,
        dur_ms: u32,
        rest_ms: u32,
        delay: &mut D,
    ) -> Result<(), C::Error> {
        if freq_hz > 0 {
            self.channel.start_tone(freq_hz, duty_for_volume(self.volume))?;
        }
        delay.delay_ms(dur_ms);
        self.channel.stop()?;
        delay.delay_ms(rest_ms);
        Ok(())
    }
}
