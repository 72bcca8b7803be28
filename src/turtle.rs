//! The "turtle": mutable composition state of a Lindenmayer system interpretation.

use std::{collections::BTreeMap, fmt::Display};

use crate::{
    group::{exchange, transpose},
    pitch_class::{Pitch, PitchClassSet},
    score::{InstrumentId, OutputEvent, Score, NOTE_ON_STATUS},
};

// -------------------------------------------------------------------------------------------------

/// Multiplies or divides a turtle value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scaling {
    Multiply(f64),
    Divide(f64),
}

impl Scaling {
    /// Factor used by `D*`, `D/`, `L*` and `L/` commands without an operand.
    pub const DEFAULT_FACTOR: f64 = 2.0;

    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Scaling::Multiply(factor) => value * factor,
            Scaling::Divide(factor) => value / factor,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// State of the turtle which moves forward on a score, writing chords.
///
/// Turtles are plain values: clones, as pushed onto the interpreter's stack or captured as
/// chords, never share state with the live turtle.
#[derive(Clone, Debug, PartialEq)]
pub struct Turtle {
    /// The chord as pitch-class set, in voice order.
    pub pitch_classes: PitchClassSet,
    /// Index of the octavewise revoicing of the chord within `range`.
    pub voicing: i64,
    /// Size of the pitch range, starting at 0.
    pub range: f64,
    /// Onset in seconds, assigned when writing the chord.
    pub time: f64,
    pub duration: f64,
    pub loudness: f64,
    /// Written chords are voice-led from the previously written chord.
    pub voice_lead: bool,
    /// Realized pitches, assigned when writing the chord.
    pub realized: Option<Vec<Pitch>>,
    /// Absolute duration in seconds added to the written duration: legato when positive,
    /// staccato when negative.
    pub overlap: f64,
    pub instruments: BTreeMap<usize, InstrumentId>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self {
            pitch_classes: PitchClassSet::default(),
            voicing: 0,
            range: 60.0,
            time: 0.0,
            duration: 1.0,
            loudness: 60.0,
            voice_lead: false,
            realized: None,
            overlap: 0.0,
            instruments: (0..12).map(|voice| (voice, InstrumentId::from(voice))).collect(),
        }
    }
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale_duration(&mut self, scaling: Scaling) {
        self.duration = scaling.apply(self.duration);
    }

    pub fn scale_loudness(&mut self, scaling: Scaling) {
        self.loudness = scaling.apply(self.loudness);
    }

    pub fn set_overlap(&mut self, overlap: f64) {
        self.overlap = overlap;
    }

    pub fn set_range(&mut self, range: f64) {
        self.range = range;
    }

    pub fn set_pitch_classes(&mut self, pitch_classes: PitchClassSet) {
        self.pitch_classes = pitch_classes;
    }

    pub fn assign_instrument(&mut self, voice: usize, instrument: InstrumentId) {
        self.instruments.insert(voice, instrument);
    }

    /// Instrument of the given voice. Voices without assignment play the instrument with the
    /// voice's index.
    pub fn instrument_for_voice(&self, voice: usize) -> InstrumentId {
        self.instruments
            .get(&voice)
            .copied()
            .unwrap_or(InstrumentId::from(voice))
    }

    pub fn transpose(&mut self, n: f64) {
        self.pitch_classes = transpose(&self.pitch_classes, n);
    }

    /// Apply the K operation. Chords with less than two voices stay unchanged.
    pub fn exchange(&mut self) {
        if let Some(exchanged) = exchange(&self.pitch_classes) {
            self.pitch_classes = exchanged;
        }
    }

    /// Move the voicing index by `n`, wrapping it into `[0, range)`.
    pub fn revoice(&mut self, n: i64) {
        let modulus = (self.range as i64).max(1) as i128;
        // widened, so steps of any size wrap
        self.voicing = (self.voicing as i128 + n as i128).rem_euclid(modulus) as i64;
    }

    /// Duration of the written notes: the duration plus the overlap, or half the duration when
    /// the overlap would make it negative.
    pub fn written_duration(&self) -> f64 {
        let duration = self.duration + self.overlap;
        if duration < 0.0 {
            self.duration / 2.0
        } else {
            duration
        }
    }

    /// Write one event per realized voice into the score. Does nothing when the turtle has not
    /// been realized.
    pub fn write(&self, score: &mut Score) {
        let Some(realized) = &self.realized else {
            return;
        };
        for (voice, key) in realized.iter().enumerate() {
            let event = OutputEvent {
                time: self.time,
                duration: self.written_duration(),
                status: NOTE_ON_STATUS,
                instrument: self.instrument_for_voice(voice),
                key: *key,
                velocity: self.loudness,
                pan: voice as f64,
            };
            log::debug!("Note {:3}: {}", voice, event);
            score.append(event);
        }
    }
}

impl Display for Turtle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "t: {:9.3}  d: {:9.3}  l: {:9.3}  vl: {}  R: {:9.3}  v: {}  O: {}",
            self.time,
            self.duration,
            self.loudness,
            self.voice_lead,
            self.range,
            self.voicing,
            self.pitch_classes
        )
    }
}

// -------------------------------------------------------------------------------------------------
