//! Realization of captured chords into output events.

use crate::{
    error::{Error, Result},
    lsystem::interpreter::CapturedChord,
    oracle::VoiceLeadingOracle,
    pitch_class::{Pitch, PitchClassSet},
    score::Score,
    turtle::Turtle,
};

// -------------------------------------------------------------------------------------------------

/// Realize the captured chords in emission order and write their notes into the score.
///
/// The first chord starts at time 0, every later chord at the start of its predecessor plus the
/// predecessor's duration. Fixed chords get placed at their voicing index. Voice-led chords get
/// led from the previously realized chord, reusing its pitches when the pitch-class content did
/// not change.
///
/// Returns the realized chords.
pub fn write_chords(
    chords: &[CapturedChord],
    oracle: &mut dyn VoiceLeadingOracle,
    score: &mut Score,
) -> Result<Vec<Turtle>> {
    let mut written: Vec<Turtle> = Vec::with_capacity(chords.len());
    for (index, chord) in chords.iter().enumerate() {
        let mut turtle = (**chord).clone();
        let prior = written.last();
        turtle.time = prior.map_or(0.0, |prior| prior.time + prior.duration);
        let realized = realize(&turtle, prior, oracle).map_err(|source| Error::Oracle {
            index,
            pitch_classes: turtle.pitch_classes.clone(),
            source,
        })?;
        if !PitchClassSet::from_pitches(&realized).same_content(&turtle.pitch_classes) {
            return Err(Error::PitchClassMismatch {
                index,
                expected: turtle.pitch_classes.clone(),
                realized,
            });
        }
        if let Some(pitch) = realized.iter().find(|pitch| **pitch > turtle.range) {
            log::warn!(
                "Chord {}: pitch {} is above the range {}",
                index,
                pitch,
                turtle.range
            );
        }
        log::debug!("Chord {:4}: {:?} {}", index, realized, turtle);
        turtle.realized = Some(realized);
        turtle.write(score);
        written.push(turtle);
    }
    Ok(written)
}

fn realize(
    turtle: &Turtle,
    prior: Option<&Turtle>,
    oracle: &mut dyn VoiceLeadingOracle,
) -> anyhow::Result<Vec<Pitch>> {
    let prior_realized = prior.and_then(|prior| {
        prior
            .realized
            .as_deref()
            .map(|realized| (prior, realized))
    });
    match prior_realized {
        Some((prior, realized)) if turtle.voice_lead => {
            if prior.pitch_classes.canonical() == turtle.pitch_classes.canonical() {
                log::trace!("Tie with prior chord {:?}", realized);
                Ok(realized.to_vec())
            } else {
                log::trace!("Leading voices from {:?}", realized);
                oracle.lead_voices(realized, &turtle.pitch_classes, turtle.range, true)
            }
        }
        _ => {
            let classification = oracle.classify(&turtle.pitch_classes)?;
            log::trace!(
                "Placing prime form {} at transposition {}, voicing {}",
                classification.prime_form,
                classification.transposition,
                turtle.voicing
            );
            oracle.realize_at_voicing(
                &classification.prime_form,
                classification.transposition,
                turtle.voicing,
                turtle.range,
            )
        }
    }
}

// -------------------------------------------------------------------------------------------------
