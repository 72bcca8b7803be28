//! Pitch-class sets: chords reduced modulo the octave.

use std::{cmp::Ordering, fmt::Display};

// -------------------------------------------------------------------------------------------------

/// A concrete pitch in semitones. `0.0` is the bottom of a voicing range.
pub type Pitch = f64;

/// Size of the octave in semitones.
pub const OCTAVE: f64 = 12.0;

// -------------------------------------------------------------------------------------------------

/// Return the pitch-class of the given pitch, a value in `[0, 12)`.
pub fn pc(pitch: Pitch) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    let pitch_class = pitch.rem_euclid(OCTAVE) + 0.0;
    if pitch_class >= OCTAVE {
        // rem_euclid may round tiny negative values up to the modulus
        0.0
    } else {
        pitch_class
    }
}

/// Total order for pitch values, used to canonicalize sets.
pub(crate) fn compare_pitches(a: &Pitch, b: &Pitch) -> Ordering {
    a.total_cmp(b)
}

// -------------------------------------------------------------------------------------------------

/// An ordered tuple of pitch-classes in `[0, 12)`.
///
/// The order of the elements is the voice order of the chord, which matters for some
/// operations (e.g. [`exchange`](crate::group::exchange)). Semantically the set is unordered:
/// use [`canonical`](Self::canonical) or [`same_content`](Self::same_content) to compare sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PitchClassSet(Vec<f64>);

impl PitchClassSet {
    /// Create a new set from the given pitches or pitch-classes.
    pub fn new(pitches: Vec<Pitch>) -> Self {
        Self(pitches.into_iter().map(pc).collect())
    }

    /// Create a new set from the pitch-classes of a realized chord.
    pub fn from_pitches(pitches: &[Pitch]) -> Self {
        Self(pitches.iter().copied().map(pc).collect())
    }

    /// Number of voices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read-only access to the pitch-classes in voice order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Return a copy of the set with all pitch-classes sorted in ascending order.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut pitch_classes = self.0.clone();
        pitch_classes.sort_by(compare_pitches);
        Self(pitch_classes)
    }

    /// returns true if both sets contain the same pitch-classes, ignoring voice order.
    pub fn same_content(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }

    /// Apply the given function to all pitch-classes and reduce the results modulo 12.
    #[must_use]
    pub fn map<F: Fn(f64) -> f64>(&self, fun: F) -> Self {
        Self(self.0.iter().map(|p| pc(fun(*p))).collect())
    }

    /// Hashable representation of the canonical content of the set.
    pub(crate) fn canonical_bits(&self) -> Vec<u64> {
        self.canonical().0.iter().map(|p| p.to_bits()).collect()
    }
}

impl From<Vec<f64>> for PitchClassSet {
    fn from(pitches: Vec<f64>) -> Self {
        Self::new(pitches)
    }
}

impl<const N: usize> From<[f64; N]> for PitchClassSet {
    fn from(pitches: [f64; N]) -> Self {
        Self::new(Vec::from(pitches))
    }
}

impl From<PitchClassSet> for Vec<f64> {
    fn from(set: PitchClassSet) -> Self {
        set.0
    }
}

impl Display for PitchClassSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pitch_classes = self
            .0
            .iter()
            .map(|p| format!("{}", p))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({})", pitch_classes)
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pitch_class_reduction() {
        assert_eq!(pc(0.0), 0.0);
        assert_eq!(pc(12.0), 0.0);
        assert_eq!(pc(-1.0), 11.0);
        assert_eq!(pc(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(pc(25.5), 1.5);
        assert_eq!(pc(-1e-18), 0.0);
    }

    #[test]
    fn canonical_ordering() {
        let set = PitchClassSet::from([7.0, 16.0, 12.0]);
        assert_eq!(set.as_slice(), &[7.0, 4.0, 0.0]);
        assert_eq!(set.canonical().as_slice(), &[0.0, 4.0, 7.0]);
        assert!(set.same_content(&PitchClassSet::from([0.0, 4.0, 7.0])));
        assert!(!set.same_content(&PitchClassSet::from([0.0, 3.0, 7.0])));
        assert_eq!(
            set.canonical_bits(),
            PitchClassSet::from([4.0, 0.0, 7.0]).canonical_bits()
        );
    }

    #[test]
    fn display() {
        assert_eq!(PitchClassSet::from([0.0, 4.0, 7.5]).to_string(), "(0, 4, 7.5)");
        assert_eq!(PitchClassSet::default().to_string(), "()");
    }
}
