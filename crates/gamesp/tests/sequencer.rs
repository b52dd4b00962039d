//! Sequencer playback traced through fake timer and tone channels.

mod common;

use common::{AudioEvent, PinChannel, SharedPin, TestTimer};
use gamesp::sequencer::{Error, SongError, SONG_END, SONG_LOOP, SONG_START};
use gamesp::tone::{duty_for_volume, Note, DEFAULT_VOLUME};
use gamesp::{Sequencer, Speaker};

fn start(freq_hz: u16, duty: u16) -> AudioEvent {
    AudioEvent::Start {
        source: "music",
        freq_hz,
        duty,
    }
}

fn stop() -> AudioEvent {
    AudioEvent::Stop { source: "music" }
}

#[test]
fn plays_note_then_rest_then_goes_idle() {
    let pin = SharedPin::new();
    let (timer, timer_state) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));

    // Raw-hertz song: 440 Hz for 100 units, a 50-unit rest, then end.
    let song = [SONG_START, 0, 1, 440, 100, 0, 50, SONG_END];
    seq.start(&song).unwrap();
    assert_eq!(timer_state.borrow().arm_log, [100]);
    assert!(seq.is_armed());

    let duty = duty_for_volume(DEFAULT_VOLUME);

    seq.on_timer_fire().unwrap();
    assert_eq!(pin.take_events(), [stop(), start(440, duty)]);
    assert_eq!(timer_state.borrow().arm_log, [100, 100]);

    seq.on_timer_fire().unwrap();
    // Rests keep a silent 100 Hz carrier running.
    assert_eq!(pin.take_events(), [stop(), start(100, 0)]);
    assert_eq!(timer_state.borrow().arm_log, [100, 100, 50]);

    seq.on_timer_fire().unwrap();
    assert_eq!(pin.take_events(), [stop()]);
    // End marker: no new arm, nothing pending.
    assert_eq!(timer_state.borrow().arm_log, [100, 100, 50]);
    assert!(!seq.is_armed());
    assert!(!seq.is_playing());
}

#[test]
fn time_unit_and_speed_scale_durations() {
    let pin = SharedPin::new();
    let (timer, timer_state) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));
    seq.set_speed(3);

    let song = [SONG_START, 1, 100, Note::E5.token(), 2, SONG_END];
    seq.start(&song).unwrap();
    seq.on_timer_fire().unwrap();

    assert_eq!(
        pin.take_events(),
        [stop(), start(Note::E5.freq_hz(), duty_for_volume(DEFAULT_VOLUME))]
    );
    // dur 2 x time unit 100 x speed 3
    assert_eq!(timer_state.borrow().arm_log, [100, 600]);
}

#[test]
fn loop_marker_rewinds_to_the_first_note() {
    let pin = SharedPin::new();
    let (timer, _) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));

    let song = [SONG_START, 1, 10, Note::C4.token(), 1, SONG_LOOP];
    seq.start(&song).unwrap();

    let duty = duty_for_volume(DEFAULT_VOLUME);
    for _ in 0..5 {
        seq.on_timer_fire().unwrap();
        assert_eq!(pin.take_events(), [stop(), start(Note::C4.freq_hz(), duty)]);
        assert!(seq.is_armed());
    }
}

#[test]
fn muting_keeps_timing_but_zeroes_the_duty() {
    let pin = SharedPin::new();
    let (timer, timer_state) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));
    seq.set_enabled(false);

    let song = [SONG_START, 1, 10, Note::G4.token(), 4, SONG_LOOP];
    seq.start(&song).unwrap();
    seq.on_timer_fire().unwrap();

    assert_eq!(pin.take_events(), [stop(), start(Note::G4.freq_hz(), 0)]);
    assert_eq!(timer_state.borrow().arm_log, [100, 40]);
}

#[test]
fn malformed_songs_are_rejected_without_touching_playback() {
    let pin = SharedPin::new();
    let (timer, timer_state) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));

    assert!(matches!(
        seq.start(&[0, 0, 1, 440, 100, SONG_END]),
        Err(Error::InvalidSong(SongError::MissingStartMarker))
    ));
    assert!(matches!(
        seq.start(&[SONG_START, 0, 1]),
        Err(Error::InvalidSong(SongError::TooShort))
    ));
    assert!(timer_state.borrow().arm_log.is_empty());
    assert!(!seq.is_armed());

    // A playing song survives a rejected replacement.
    let good = [SONG_START, 0, 1, 440, 100, SONG_END];
    seq.start(&good).unwrap();
    seq.start(&[0]).unwrap_err();
    seq.on_timer_fire().unwrap();
    assert!(pin
        .take_events()
        .contains(&start(440, duty_for_volume(DEFAULT_VOLUME))));
}

#[test]
fn stop_parks_the_cursor_so_an_inflight_callback_goes_idle() {
    let pin = SharedPin::new();
    let (timer, timer_state) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));

    let song = [SONG_START, 0, 1, 440, 100, SONG_LOOP];
    seq.start(&song).unwrap();
    seq.on_timer_fire().unwrap();
    pin.take_events();

    seq.stop().unwrap();
    assert_eq!(timer_state.borrow().cancels, 1);
    assert_eq!(pin.take_events(), [stop()]);

    // The expiry raced the cancel: the callback still runs, reads the
    // header marker and idles instead of sounding a stale note.
    seq.on_timer_fire().unwrap();
    assert_eq!(pin.take_events(), [stop()]);
    assert!(!seq.is_armed());
    let arms = timer_state.borrow().arm_log.len();
    assert_eq!(arms, 2); // start delay + first note only
}

#[test]
fn foreground_effect_steals_the_pin_until_the_next_callback() {
    // Both the speaker and the sequencer write the same physical pin;
    // there is no arbitration, the last writer owns it.
    let pin = SharedPin::new();
    let (timer, _) = TestTimer::new();
    let mut seq = Sequencer::new(timer, PinChannel::new(&pin, "music"));
    let mut speaker = Speaker::new(PinChannel::new(&pin, "fx"));

    let song = [SONG_START, 0, 1, 440, 1000, SONG_LOOP];
    seq.start(&song).unwrap();
    seq.on_timer_fire().unwrap();

    let mut delay = common::FakeDelay::new(&common::FakeClock::new());
    speaker.play_note(Note::C5, 50, 0, &mut delay).unwrap();

    let events = pin.take_events();
    assert_eq!(
        events,
        [
            AudioEvent::Stop { source: "music" },
            AudioEvent::Start {
                source: "music",
                freq_hz: 440,
                duty: duty_for_volume(DEFAULT_VOLUME)
            },
            // The effect silences the music note mid-flight.
            AudioEvent::Start {
                source: "fx",
                freq_hz: Note::C5.freq_hz(),
                duty: duty_for_volume(DEFAULT_VOLUME)
            },
            AudioEvent::Stop { source: "fx" },
        ]
    );

    // The next callback restores the song on schedule.
    seq.on_timer_fire().unwrap();
    assert_eq!(
        pin.take_events()[1],
        AudioEvent::Start {
            source: "music",
            freq_hz: 440,
            duty: duty_for_volume(DEFAULT_VOLUME)
        }
    );
}
