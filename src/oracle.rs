//! Voice-leading oracle: chord classification and minimal motion revoicing.

use std::fmt::Debug;

use crate::pitch_class::{Pitch, PitchClassSet};

// -------------------------------------------------------------------------------------------------

pub mod voicelead;

// -------------------------------------------------------------------------------------------------

/// A pitch-class set split into its prime form and a transposition of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub prime_form: PitchClassSet,
    pub transposition: f64,
}

// -------------------------------------------------------------------------------------------------

/// Classifies and realizes chords for the chord writer and the `P` command.
///
/// Failures are opaque to the generator and abort a generation run.
pub trait VoiceLeadingOracle: Debug {
    /// Split the set into a prime form and a transposition.
    fn classify(&mut self, pitch_classes: &PitchClassSet) -> anyhow::Result<Classification>;

    /// Realize the transposed prime form at the given voicing index within `[0, range]`.
    fn realize_at_voicing(
        &mut self,
        prime_form: &PitchClassSet,
        transposition: f64,
        voicing: i64,
        range: f64,
    ) -> anyhow::Result<Vec<Pitch>>;

    /// Voicing of `to` within `[0, range]` that moves the least from the `from` pitches.
    fn lead_voices(
        &mut self,
        from: &[Pitch],
        to: &PitchClassSet,
        range: f64,
        avoid_parallels: bool,
    ) -> anyhow::Result<Vec<Pitch>>;
}
