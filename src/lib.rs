//! Chord progressions from Lindenmayer systems.
//!
//! An axiom gets rewritten with a flat rule table. The resulting production's tokens are
//! commands for a turtle, which transforms a pitch-class set with operations of the generalized
//! contextual group (transposition, inversion, exchange, contextual transposition) and writes
//! snapshots of itself as chords. Written chords get realized by a [`VoiceLeadingOracle`] into
//! concrete pitches, either at a fixed octavewise voicing or by minimal motion from the previous
//! chord, and end up as [`OutputEvent`]s in a time ordered [`Score`].
//!
//! See [`ChordLindenmayer`] for the entry point and [`Command`] for the command set.

pub mod error;
pub use error::{Error, Result};

pub mod pitch_class;
pub use pitch_class::{Pitch, PitchClassSet};

pub mod group;
pub mod voicing;
pub use voicing::VoicingCache;

pub mod chord;

pub mod oracle;
pub use oracle::{voicelead::Voicelead, Classification, VoiceLeadingOracle};

pub mod score;
pub use score::{InstrumentId, OutputEvent, Score};

pub mod turtle;
pub use turtle::{Scaling, Turtle};

pub mod lsystem;
pub use lsystem::{
    command::Command,
    interpreter::{CapturedChord, Interpreter},
    production::RuleTable,
    ChordLindenmayer, GeneratorOptions,
};

pub mod prelude;
