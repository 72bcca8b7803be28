//! The chordlsys prelude.
//!
//! The purpose of this module is to alleviate imports of common chordlsys types:
//!
//! ```
//! # #![allow(unused_imports)]
//! use chordlsys::prelude::*;
//! ```

pub use super::{
    // group operations
    group::{
        contextual_transpose, exchange, invert, invert_pitch, is_i_form, is_t_form, transpose,
        transpose_pitch,
    },
    // pitch-class helpers and chord names
    chord::{chord_names, chord_pitch_classes},
    pitch_class::{pc, OCTAVE},
    // rewriting
    lsystem::production::produce,
    score::{writer::write_chords, NOTE_ON_STATUS},
    voicing::{decrement_voicing, increment_voicing},
    // all public basic types
    CapturedChord,
    ChordLindenmayer,
    Classification,
    Command,
    Error,
    GeneratorOptions,
    InstrumentId,
    Interpreter,
    OutputEvent,
    Pitch,
    PitchClassSet,
    RuleTable,
    Scaling,
    Score,
    Turtle,
    VoiceLeadingOracle,
    Voicelead,
    VoicingCache,
};
