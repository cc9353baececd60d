//! Non-blocking chime player
//!
//! A chime is a short fixed sequence of square-wave notes. The player only
//! remembers which note is sounding and when it started; the control loop
//! calls `advance` every iteration and the player switches notes when the
//! current one has run its duration.

use crate::config::CHIME_LEN;
use crate::traits::ToneOutput;

/// A sequence of note periods with a common note length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Melody {
    pub periods_us: [u32; CHIME_LEN],
    pub note_ms: u32,
}

impl Melody {
    pub const fn new(periods_us: [u32; CHIME_LEN], note_ms: u32) -> Self {
        Self {
            periods_us,
            note_ms,
        }
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Playback {
    Idle,
    Playing {
        melody: Melody,
        note: usize,
        started_ms: u64,
    },
}

/// Plays one melody at a time without blocking
#[derive(Debug, Clone, Copy)]
pub struct MelodyPlayer {
    playback: Playback,
}

impl Default for MelodyPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MelodyPlayer {
    pub const fn new() -> Self {
        Self {
            playback: Playback::Idle,
        }
    }

    /// Start a melody from its first note, replacing anything playing
    pub fn start<T: ToneOutput>(&mut self, melody: Melody, now_ms: u64, tone: &mut T) {
        tone.play(melody.periods_us[0]);
        self.playback = Playback::Playing {
            melody,
            note: 0,
            started_ms: now_ms,
        };
    }

    /// Move to the next note when the current one is done
    ///
    /// Returns true once the melody has finished (and when idle).
    pub fn advance<T: ToneOutput>(&mut self, now_ms: u64, tone: &mut T) -> bool {
        let Playback::Playing {
            melody,
            mut note,
            mut started_ms,
        } = self.playback
        else {
            return true;
        };

        let note_ms = u64::from(melody.note_ms);
        // Catch up if the loop stalled for more than one note
        while now_ms.saturating_sub(started_ms) >= note_ms {
            started_ms += note_ms;
            note += 1;
            if note >= CHIME_LEN {
                tone.silence();
                self.playback = Playback::Idle;
                return true;
            }
            tone.play(melody.periods_us[note]);
        }

        self.playback = Playback::Playing {
            melody,
            note,
            started_ms,
        };
        false
    }

    /// Silence the output and drop any melody in progress
    pub fn stop<T: ToneOutput>(&mut self, tone: &mut T) {
        if self.is_playing() {
            tone.silence();
        }
        self.playback = Playback::Idle;
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback, Playback::Playing { .. })
    }
}
