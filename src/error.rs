//! Errors that abort a generation run.

use crate::pitch_class::{Pitch, PitchClassSet};

// -------------------------------------------------------------------------------------------------

/// Fatal errors of the voicing, interpretation, and writing stages.
///
/// Unknown tokens and commands are never errors: they get passed through without effect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can not voice an empty chord")]
    EmptyChord,

    #[error("chord {pitch_classes} has no voicing within range {range}")]
    NoVoicing {
        pitch_classes: PitchClassSet,
        range: f64,
    },

    #[error("failed to interpret command '{token}': {source}")]
    Command {
        token: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to realize chord #{index} {pitch_classes}: {source}")]
    Oracle {
        index: usize,
        pitch_classes: PitchClassSet,
        #[source]
        source: anyhow::Error,
    },

    #[error("internal consistency violation: chord #{index} {expected} was realized as {realized:?}")]
    PitchClassMismatch {
        index: usize,
        expected: PitchClassSet,
        realized: Vec<Pitch>,
    },
}

/// Result type of all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
