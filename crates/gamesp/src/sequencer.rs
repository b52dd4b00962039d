//! Background music sequencer
//!
//! Songs play off a hardware one-shot timer: every callback stops the
//! previous note, starts the next one and re-arms the timer for that
//! note's duration. The game loop never blocks on music.
//!
//! # Song format
//!
//! A song is a flat `&[i32]`:
//!
//! ```text
//! [ START, note_names, time_unit, pitch, dur, pitch, dur, ..., END|LOOP ]
//! ```
//!
//! * `START` opens the song. `note_names` selects how pitches read:
//!   nonzero means 1-based [`Note`] tokens, zero means raw hertz.
//! * `time_unit` scales every duration: a note lasts
//!   `dur * time_unit * speed` milliseconds.
//! * `pitch` 0 is a rest. Rests keep a silent carrier running so the
//!   PWM peripheral stays warm between notes.
//! * `END` stops playback, `LOOP` rewinds to the first note.
//!
//! `START` and `END` share the value -1 on purpose: [`Sequencer::stop`]
//! parks the cursor on index 0, so a callback already in flight reads
//! the header, sees a terminal marker and goes idle instead of playing
//! a stale note.
//!
//! The sequencer drives the same physical pin as the foreground
//! [`Speaker`](crate::Speaker) through its own [`ToneChannel`] handle.
//! There is no arbitration: whichever side wrote last owns the pin until
//! its own duration expires. Games that care pause the song around
//! effects.

use core::fmt::Debug;

use crate::tone::{duty_for_volume, Note, ToneChannel, DEFAULT_VOLUME};

/// Song header marker.
pub const SONG_START: i32 = -1;
/// Terminal marker, same value as [`SONG_START`] (see module docs).
pub const SONG_END: i32 = -1;
/// Terminal marker that rewinds instead of stopping.
pub const SONG_LOOP: i32 = -3;
/// Pitch value for a rest.
pub const REST: i32 = 0;

/// Index of the first pitch in a song slice.
const FIRST_NOTE_INDEX: usize = 3;
/// Delay between `start` and the first note.
const START_DELAY_MS: u32 = 100;
/// Carrier frequency used for rests, at zero duty.
const SILENT_CARRIER_HZ: u16 = 100;

/// Re-armable one-shot millisecond timer whose expiry runs the
/// sequencer callback. The board layer owns the ISR glue; it must call
/// [`Sequencer::on_timer_fire`] exactly once per expiry.
pub trait OneShotTimer {
    type Error: Debug;

    /// Schedule the next expiry `ms` from now, replacing any pending one.
    fn arm_ms(&mut self, ms: u32) -> Result<(), Self::Error>;

    /// Drop the pending expiry, if any.
    fn cancel(&mut self) -> Result<(), Self::Error>;
}

/// Why a song slice was rejected by [`Sequencer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongError {
    /// The slice does not open with [`SONG_START`].
    MissingStartMarker,
    /// Shorter than a header plus one terminal marker.
    TooShort,
}

impl core::fmt::Display for SongError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SongError::MissingStartMarker => write!(f, "song does not begin with a start marker"),
            SongError::TooShort => write!(f, "song is shorter than a header"),
        }
    }
}

impl core::error::Error for SongError {}

/// Sequencer failure: a bad song, or an error from the timer or tone
/// peripheral underneath.
#[derive(Debug)]
pub enum Error<T, C> {
    InvalidSong(SongError),
    Timer(T),
    Channel(C),
}

impl<T: Debug, C: Debug> core::fmt::Display for Error<T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidSong(e) => write!(f, "invalid song: {e}"),
            Error::Timer(e) => write!(f, "timer error: {e:?}"),
            Error::Channel(e) => write!(f, "tone channel error: {e:?}"),
        }
    }
}

impl<T: Debug, C: Debug> core::error::Error for Error<T, C> {}

/// Timer-driven song player.
///
/// The song lives in the caller's flash or RAM for the whole playback,
/// hence the lifetime.
pub struct Sequencer<'s, T, C> {
    timer: T,
    channel: C,
    song: Option<&'s [i32]>,
    index: usize,
    note_names: bool,
    time_unit: u32,
    speed: u32,
    duty: u16,
    enabled: bool,
    armed: bool,
}

impl<'s, T: OneShotTimer, C: ToneChannel> Sequencer<'s, T, C> {
    pub fn new(timer: T, channel: C) -> Self {
        Self {
            timer,
            channel,
            song: None,
            index: 0,
            note_names: false,
            time_unit: 1,
            speed: 1,
            duty: duty_for_volume(DEFAULT_VOLUME),
            enabled: true,
            armed: false,
        }
    }

    /// Begin playing `song` from its first note, replacing any current
    /// playback. The first note sounds after a short fixed delay.
    ///
    /// A malformed song is rejected before any state changes, so a song
    /// already playing keeps playing.
    pub fn start(&mut self, song: &'s [i32]) -> Result<(), Error<T::Error, C::Error>> {
        if song.len() < FIRST_NOTE_INDEX + 1 {
            log::warn!("rejecting song: {} words is too short", song.len());
            return Err(Error::InvalidSong(SongError::TooShort));
        }
        if song[0] != SONG_START {
            log::warn!("rejecting song: missing start marker");
            return Err(Error::InvalidSong(SongError::MissingStartMarker));
        }

        self.song = Some(song);
        self.note_names = song[1] != 0;
        self.time_unit = song[2].max(1) as u32;
        self.index = FIRST_NOTE_INDEX;
        self.timer.arm_ms(START_DELAY_MS).map_err(Error::Timer)?;
        self.armed = true;
        Ok(())
    }

    /// Stop playback.
    ///
    /// The timer is cancelled, but a callback that already fired is
    /// handled too: the cursor parks on index 0, whose value is a
    /// terminal marker, so [`on_timer_fire`](Self::on_timer_fire) goes
    /// idle instead of sounding a note.
    pub fn stop(&mut self) -> Result<(), Error<T::Error, C::Error>> {
        self.index = 0;
        self.armed = false;
        self.timer.cancel().map_err(Error::Timer)?;
        self.channel.stop().map_err(Error::Channel)?;
        Ok(())
    }

    /// Advance one step: silence the previous note, sound the next and
    /// re-arm the timer. Called from the timer expiry context.
    pub fn on_timer_fire(&mut self) -> Result<(), Error<T::Error, C::Error>> {
        self.armed = false;
        let Some(song) = self.song else {
            return Ok(());
        };
        self.channel.stop().map_err(Error::Channel)?;

        let mut index = self.index;
        if song.get(index) == Some(&SONG_LOOP) {
            index = FIRST_NOTE_INDEX;
        }
        let (pitch, dur) = match (song.get(index), song.get(index + 1)) {
            (Some(&p), Some(&d)) if p != SONG_END => (p, d),
            // End marker, truncated tail, or the parked stop() cursor.
            _ => {
                self.song = None;
                self.index = 0;
                return Ok(());
            }
        };

        let duty = if self.enabled { self.duty } else { 0 };
        let (freq, duty) = if pitch == REST {
            (SILENT_CARRIER_HZ, 0)
        } else if self.note_names {
            match Note::from_token(pitch) {
                Some(note) => (note.freq_hz(), duty),
                None => {
                    log::warn!("note token {pitch} out of scale, resting");
                    (SILENT_CARRIER_HZ, 0)
                }
            }
        } else {
            (pitch.clamp(1, u16::MAX as i32) as u16, duty)
        };
        self.channel.start_tone(freq, duty).map_err(Error::Channel)?;

        let hold_ms = (dur.max(0) as u32)
            .saturating_mul(self.time_unit)
            .saturating_mul(self.speed);
        self.timer.arm_ms(hold_ms).map_err(Error::Timer)?;
        self.armed = true;
        self.index = index + 2;
        Ok(())
    }

    /// Loudness for subsequent notes, as a volume step shared with the
    /// foreground speaker scale.
    pub fn set_volume(&mut self, volume: u8) {
        self.duty = duty_for_volume(volume);
    }

    /// Tempo multiplier applied on top of the song's own time unit.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(1);
    }

    /// Mute or unmute without losing the playback position. Notes keep
    /// their timing, only the duty goes to zero.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True while a timer expiry is pending.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// True while a song is loaded (playing or mid-stop).
    pub fn is_playing(&self) -> bool {
        self.song.is_some() && self.armed
    }
}
