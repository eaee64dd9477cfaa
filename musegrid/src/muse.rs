//! The muse demo mode: a minimal edge-triggered step sequencer that turns
//! scan ticks into note playback.
//!
//! The sequencer walks a fixed 16-step scale table, advancing one step every
//! `tempo` ticks. The pitch offset and the tempo are adjusted live from the
//! rotary encoder while the mode is active.

use core::cell::RefCell;

use embassy_time::{Duration, Timer};

use crate::config::MuseConfig;

/// Interval of one scan iteration, the sequencer's time base
pub const SCAN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Velocity used for every sequenced note
const NOTE_VELOCITY: u8 = 0xF;

/// Semitone steps of one 16-step cycle, added to the pitch offset
pub const SCALE: [u8; 16] = [0, 3, 5, 7, 10, 12, 15, 12, 10, 7, 5, 3, 0, 3, 5, 7];

/// Tone generation, supplied by the board.
///
/// Frequencies identify notes: a note started with `play_note` keeps sounding
/// until the same frequency is passed to `stop_note` or `stop_all_notes` runs.
pub trait AudioDriver {
    fn play_note(&mut self, frequency: f32, velocity: u8);
    fn stop_note(&mut self, frequency: f32);
    fn stop_all_notes(&mut self);
}

/// Frequency of a midi note in Hz.
///
/// Exact power-of-two octave scaling over a reference octave, which avoids
/// pulling a float `exp2` into the firmware.
pub fn midi_note_frequency(note: u8) -> f32 {
    // C4 (midi note 60) .. B4
    const REFERENCE_OCTAVE: [f32; 12] = [
        261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.16, 493.88,
    ];
    let base = REFERENCE_OCTAVE[(note % 12) as usize];
    let octave = (note / 12) as i32 - 5;
    if octave >= 0 {
        base * (1u32 << octave) as f32
    } else {
        base / (1u32 << -octave) as f32
    }
}

/// The mutable state of the muse mode.
///
/// Offset and tempo adjustments wrap at the type bounds, mirroring the
/// unsigned counters they came from; the tick guards the tempo modulo so a
/// zero tempo pins the step counter instead of dividing by zero.
pub struct MuseState {
    mode: bool,
    last_note: u8,
    counter: u16,
    offset: u8,
    tempo: u16,
    clock: u8,
}

impl MuseState {
    pub fn new(config: MuseConfig) -> Self {
        Self {
            mode: false,
            last_note: 0,
            counter: 0,
            offset: config.offset,
            tempo: config.tempo,
            clock: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mode
    }

    pub fn set_mode(&mut self, enabled: bool) {
        self.mode = enabled;
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn offset_up(&mut self) {
        self.offset = self.offset.wrapping_add(1);
    }

    pub fn offset_down(&mut self) {
        self.offset = self.offset.wrapping_sub(1);
    }

    pub fn tempo_up(&mut self) {
        self.tempo = self.tempo.wrapping_add(1);
    }

    pub fn tempo_down(&mut self) {
        self.tempo = self.tempo.wrapping_sub(1);
    }

    /// Advance the 16-step clock and return the step to sound
    fn clock_pulse(&mut self) -> u8 {
        let step = self.clock;
        self.clock = (self.clock + 1) % SCALE.len() as u8;
        step
    }

    /// One scan iteration of the sequencer.
    pub fn tick(&mut self, audio: &mut impl AudioDriver) {
        if self.mode {
            if self.counter == 0 {
                let note = self.offset.wrapping_add(SCALE[self.clock_pulse() as usize]);
                if note != self.last_note {
                    audio.stop_note(midi_note_frequency(self.last_note));
                    audio.play_note(midi_note_frequency(note), NOTE_VELOCITY);
                    self.last_note = note;
                }
            }
            self.counter = match self.tempo {
                // A zero tempo pins the counter, a step boundary every tick
                0 => 0,
                tempo => self.counter.wrapping_add(1) % tempo,
            };
        } else if self.counter != 0 {
            audio.stop_all_notes();
            self.counter = 0;
        }
    }
}

/// Periodic task driving the sequencer once per scan iteration.
pub struct MuseSequencer<'a, A: AudioDriver> {
    state: &'a RefCell<MuseState>,
    audio: A,
}

impl<'a, A: AudioDriver> MuseSequencer<'a, A> {
    pub fn new(state: &'a RefCell<MuseState>, audio: A) -> Self {
        Self { state, audio }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            Timer::after(SCAN_TICK_INTERVAL).await;
            self.state.borrow_mut().tick(&mut self.audio);
        }
    }
}

#[cfg(test)]
mod test {
    use std::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum AudioCall {
        Play(u32),
        Stop(u32),
        StopAll,
    }

    #[derive(Default)]
    struct MockAudio {
        calls: Vec<AudioCall>,
    }

    impl AudioDriver for MockAudio {
        fn play_note(&mut self, frequency: f32, _velocity: u8) {
            self.calls.push(AudioCall::Play(frequency as u32));
        }

        fn stop_note(&mut self, frequency: f32) {
            self.calls.push(AudioCall::Stop(frequency as u32));
        }

        fn stop_all_notes(&mut self) {
            self.calls.push(AudioCall::StopAll);
        }
    }

    fn state_with_tempo(tempo: u16) -> MuseState {
        MuseState::new(MuseConfig { offset: 70, tempo })
    }

    #[test]
    fn test_midi_note_frequency() {
        assert!((midi_note_frequency(69) - 440.0).abs() < 0.01);
        assert!((midi_note_frequency(81) - 880.0).abs() < 0.01);
        assert!((midi_note_frequency(57) - 220.0).abs() < 0.01);
        assert!((midi_note_frequency(60) - 261.63).abs() < 0.01);
    }

    #[test]
    fn test_one_note_per_tempo_window() {
        let mut state = state_with_tempo(4);
        state.set_mode(true);
        let mut audio = MockAudio::default();

        for _ in 0..4 {
            state.tick(&mut audio);
        }
        // One step boundary in the window: stop of the (silent) previous note,
        // then the new note
        assert_eq!(audio.calls.len(), 2);
        assert!(matches!(audio.calls[1], AudioCall::Play(_)));

        // The next window sounds the next scale step
        audio.calls.clear();
        for _ in 0..4 {
            state.tick(&mut audio);
        }
        assert_eq!(audio.calls.len(), 2);
    }

    #[test]
    fn test_repeated_note_is_not_retriggered() {
        let mut state = state_with_tempo(1);
        state.set_mode(true);
        let mut audio = MockAudio::default();

        state.tick(&mut audio); // step 0 sounds offset + 0
        assert_eq!(audio.calls.len(), 2);

        // Bring the offset down so the next step resolves to the same note
        for _ in 0..3 {
            state.offset_down();
        }
        state.tick(&mut audio); // step 1 is +3, same note as before
        assert_eq!(audio.calls.len(), 2);
    }

    #[test]
    fn test_mode_off_mid_cycle_stops_all() {
        let mut state = state_with_tempo(4);
        state.set_mode(true);
        let mut audio = MockAudio::default();

        state.tick(&mut audio);
        state.tick(&mut audio);
        audio.calls.clear();

        state.set_mode(false);
        state.tick(&mut audio);
        assert_eq!(audio.calls, [AudioCall::StopAll]);

        // Counter is reset, further ticks are silent
        state.tick(&mut audio);
        assert_eq!(audio.calls.len(), 1);
    }

    #[test]
    fn test_offset_and_tempo_wrap() {
        let mut state = MuseState::new(MuseConfig { offset: 0, tempo: 0 });
        state.offset_down();
        assert_eq!(state.offset(), u8::MAX);
        state.offset_up();
        assert_eq!(state.offset(), 0);
        state.tempo_down();
        assert_eq!(state.tempo(), u16::MAX);
    }

    #[test]
    fn test_zero_tempo_does_not_panic() {
        let mut state = MuseState::new(MuseConfig { offset: 70, tempo: 0 });
        state.set_mode(true);
        let mut audio = MockAudio::default();
        state.tick(&mut audio);
        state.tick(&mut audio);
        // Every tick is a step boundary, but the note only changes per step
        assert!(audio.calls.len() >= 2);
    }

    #[test]
    fn test_clock_wraps_at_cycle_length() {
        let mut state = state_with_tempo(1);
        for _ in 0..SCALE.len() {
            state.clock_pulse();
        }
        assert_eq!(state.clock_pulse(), 0);
    }
}
