//! Operations of the generalized contextual group on pitch-class sets.
//!
//! All operations reduce their results modulo 12 and keep the voice order of their input.

use crate::pitch_class::{pc, Pitch, PitchClassSet, OCTAVE};

// -------------------------------------------------------------------------------------------------

/// Pitch-class transposition of a single pitch by `n` semitones.
pub fn transpose_pitch(pitch: Pitch, n: f64) -> f64 {
    pc(pitch + n)
}

/// Pitch-class inversion of a single pitch around `n`.
pub fn invert_pitch(pitch: Pitch, n: f64) -> f64 {
    pc(n - pitch)
}

/// T: transpose all voices of the chord by `n` semitones.
#[must_use]
pub fn transpose(chord: &PitchClassSet, n: f64) -> PitchClassSet {
    chord.map(|p| p + n)
}

/// I: invert all voices of the chord around `n`.
#[must_use]
pub fn invert(chord: &PitchClassSet, n: f64) -> PitchClassSet {
    chord.map(|p| n - p)
}

/// K: inversion by exchange. The axis is the sum of the first two voices, so the first two
/// pitch-classes trade places. Returns `None` for chords with less than two voices.
pub fn exchange(chord: &PitchClassSet) -> Option<PitchClassSet> {
    match chord.as_slice() {
        [first, second, ..] => Some(invert(chord, first + second)),
        _ => None,
    }
}

// -------------------------------------------------------------------------------------------------

/// Scan transpositions/inversions `0, g, 2g, ...` below 12 of `y` for a form of `x`.
///
/// The generator is not checked for evenly dividing the octave: a generator which does not,
/// may step over a match. Non positive generators never match.
fn scan_forms<F>(x: &PitchClassSet, y: &PitchClassSet, generator: f64, operation: F) -> bool
where
    F: Fn(&PitchClassSet, f64) -> PitchClassSet,
{
    if generator <= 0.0 || generator.is_nan() {
        log::warn!("Ignoring form scan with invalid generator {}", generator);
        return false;
    }
    let x = x.canonical();
    let mut n = 0.0;
    while n < OCTAVE {
        if operation(y, n).canonical() == x {
            return true;
        }
        n += generator;
    }
    false
}

/// returns true if `x` is a T-form of `y`: some transposition of `y` by a multiple of the
/// given generator has the same pitch-class content as `x`.
pub fn is_t_form(x: &PitchClassSet, y: &PitchClassSet, generator: f64) -> bool {
    scan_forms(x, y, generator, transpose)
}

/// returns true if `x` is an I-form of `y`: some inversion of `y` around a multiple of the
/// given generator has the same pitch-class content as `x`.
pub fn is_i_form(x: &PitchClassSet, y: &PitchClassSet, generator: f64) -> bool {
    scan_forms(x, y, generator, invert)
}

/// Q: contextual transposition of `chord` by `n` with respect to `stabilizer`.
///
/// T-forms of the stabilizer are transposed up by `n`, I-forms down by `n`. Returns `None` when
/// the chord is neither.
pub fn contextual_transpose(
    chord: &PitchClassSet,
    n: f64,
    stabilizer: &PitchClassSet,
    generator: f64,
) -> Option<PitchClassSet> {
    if is_t_form(chord, stabilizer, generator) {
        Some(transpose(chord, n))
    } else if is_i_form(chord, stabilizer, generator) {
        Some(transpose(chord, -n))
    } else {
        None
    }
}

// -------------------------------------------------------------------------------------------------
