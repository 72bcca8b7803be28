//! Octavewise voicings of pitch-class sets within a range, and their cache.

use std::{collections::HashMap, rc::Rc};

use crate::{
    error::{Error, Result},
    pitch_class::{compare_pitches, pc, Pitch, PitchClassSet, OCTAVE},
};

// -------------------------------------------------------------------------------------------------

/// Highest placement of the pitch's pitch-class that does not exceed `range`.
fn highest_placement(pitch: Pitch, range: f64) -> Pitch {
    let pitch_class = pc(pitch);
    let octaves = ((range - pitch_class) / OCTAVE).floor().max(0.0);
    pitch_class + octaves * OCTAVE
}

/// Return the next higher voicing of `chord` within `[0, range]`, or `None` when all voices
/// overflowed.
///
/// Voices act like the digits of an odometer: the first voice that can be raised by an octave
/// is raised, all voices before it wrap back to their lowest placement.
pub fn increment_voicing(chord: &[Pitch], range: f64) -> Option<Vec<Pitch>> {
    let mut voicing = chord.to_vec();
    for place in 0..voicing.len() {
        let raised = voicing[place] + OCTAVE;
        if raised <= range {
            voicing[place] = raised;
            return Some(voicing);
        }
        voicing[place] = pc(voicing[place]);
    }
    None
}

/// Return the next lower voicing of `chord` within `[0, range]`, or `None` when all voices
/// underflowed.
///
/// The counterpart of [`increment_voicing`]: underflowing voices wrap to their highest
/// placement within range.
pub fn decrement_voicing(chord: &[Pitch], range: f64) -> Option<Vec<Pitch>> {
    let mut voicing = chord.to_vec();
    for place in 0..voicing.len() {
        let lowered = voicing[place] - OCTAVE;
        if lowered >= 0.0 {
            voicing[place] = lowered;
            return Some(voicing);
        }
        voicing[place] = highest_placement(voicing[place], range);
    }
    None
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct VoicingKey {
    pitch_classes: Vec<u64>,
    range: u64,
}

impl VoicingKey {
    fn new(pitch_classes: &PitchClassSet, range: f64) -> Self {
        Self {
            pitch_classes: pitch_classes.canonical_bits(),
            range: (range + 0.0).to_bits(),
        }
    }
}

/// Memoized voicings of pitch-class sets.
///
/// Keys are the canonical pitch-class content of a chord together with the range. Entries are
/// computed lazily on first access and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct VoicingCache {
    voicings: HashMap<VoicingKey, Rc<[Vec<Pitch>]>>,
}

impl VoicingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached pitch-class sets.
    pub fn len(&self) -> usize {
        self.voicings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voicings.is_empty()
    }

    /// All voicings of the chord's pitch-classes within `[0, range]`, from the lowest voicing
    /// upwards.
    pub fn voicings(&mut self, chord: &PitchClassSet, range: f64) -> Result<Rc<[Vec<Pitch>]>> {
        if chord.is_empty() {
            return Err(Error::EmptyChord);
        }
        let key = VoicingKey::new(chord, range);
        if let Some(voicings) = self.voicings.get(&key) {
            return Ok(Rc::clone(voicings));
        }
        let pitch_classes = chord.canonical();
        if pitch_classes.iter().any(|p| *p > range) {
            return Err(Error::NoVoicing {
                pitch_classes,
                range,
            });
        }
        let voicings: Rc<[Vec<Pitch>]> = Self::enumerate(&pitch_classes, range).into();
        log::debug!(
            "Enumerated {} voicings of {} in range {}",
            voicings.len(),
            pitch_classes,
            range
        );
        self.voicings.insert(key, Rc::clone(&voicings));
        Ok(voicings)
    }

    /// Select a voicing of the chord by index. The index wraps around the number of voicings.
    pub fn voice(&mut self, chord: &PitchClassSet, index: i64, range: f64) -> Result<Vec<Pitch>> {
        let voicings = self.voicings(chord, range)?;
        let index = index.rem_euclid(voicings.len() as i64) as usize;
        Ok(voicings[index].clone())
    }

    fn enumerate(pitch_classes: &PitchClassSet, range: f64) -> Vec<Vec<Pitch>> {
        let mut bottom = pitch_classes.as_slice().to_vec();
        let mut down = bottom.clone();
        while let Some(lower) = decrement_voicing(&down, range) {
            bottom = lower.clone();
            bottom.sort_by(compare_pitches);
            down = lower;
        }
        let mut voicings = vec![bottom.clone()];
        let mut up = bottom;
        while let Some(higher) = increment_voicing(&up, range) {
            voicings.push(higher.clone());
            up = higher;
        }
        voicings
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn odometer() {
        assert_eq!(increment_voicing(&[0.0, 4.0], 24.0), Some(vec![12.0, 4.0]));
        assert_eq!(increment_voicing(&[24.0, 4.0], 24.0), Some(vec![0.0, 16.0]));
        assert_eq!(increment_voicing(&[24.0, 16.0], 24.0), None);

        assert_eq!(decrement_voicing(&[12.0, 4.0], 24.0), Some(vec![0.0, 4.0]));
        assert_eq!(decrement_voicing(&[0.0, 16.0], 24.0), Some(vec![24.0, 4.0]));
        assert_eq!(decrement_voicing(&[0.0, 4.0], 24.0), None);
    }

    #[test]
    fn decrement_carries_through_voices() {
        // the first voice wraps to the top, the second one gets lowered
        assert_eq!(
            decrement_voicing(&[0.0, 16.0, 7.0], 24.0),
            Some(vec![24.0, 4.0, 7.0])
        );
        // two voices wrap to their highest placement before the third one gets lowered
        assert_eq!(
            decrement_voicing(&[0.0, 4.0, 19.0], 24.0),
            Some(vec![24.0, 16.0, 7.0])
        );
        assert_eq!(
            decrement_voicing(&[0.0, 4.0, 19.0], 30.0),
            Some(vec![24.0, 28.0, 7.0])
        );
        assert_eq!(decrement_voicing(&[0.0, 4.0, 7.0], 30.0), None);
        // decrementing undoes incrementing across carries
        let voicing = vec![24.0, 16.0, 7.0];
        let higher = increment_voicing(&voicing, 24.0);
        assert_eq!(higher, Some(vec![0.0, 4.0, 19.0]));
        assert_eq!(
            higher.and_then(|higher| decrement_voicing(&higher, 24.0)),
            Some(voicing)
        );
    }

    #[test]
    fn voicings_stay_in_range() -> Result<()> {
        let mut cache = VoicingCache::new();
        for range in [12.0, 24.0, 36.5, 60.0] {
            for chord in [
                PitchClassSet::from([0.0, 4.0, 7.0]),
                PitchClassSet::from([11.0, 2.0, 5.0, 8.0]),
                PitchClassSet::from([0.0]),
            ] {
                let voicings = cache.voicings(&chord, range)?;
                assert!(!voicings.is_empty());
                for voicing in voicings.iter() {
                    assert!(voicing.iter().all(|p| (0.0..=range).contains(p)));
                    assert!(PitchClassSet::from_pitches(voicing).same_content(&chord));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn voicing_count() -> Result<()> {
        let mut cache = VoicingCache::new();
        // 0 has 6 placements in [0, 60], 4 and 7 have 5 each
        let voicings = cache.voicings(&PitchClassSet::from([0.0, 4.0, 7.0]), 60.0)?;
        assert_eq!(voicings.len(), 6 * 5 * 5);
        assert_eq!(voicings[0], vec![0.0, 4.0, 7.0]);
        assert_eq!(voicings[1], vec![12.0, 4.0, 7.0]);
        assert_eq!(voicings[voicings.len() - 1], vec![60.0, 52.0, 55.0]);
        Ok(())
    }

    #[test]
    fn cache_is_keyed_by_content_and_range() -> Result<()> {
        let mut cache = VoicingCache::new();
        let first = cache.voicings(&PitchClassSet::from([7.0, 0.0, 4.0]), 36.0)?;
        let second = cache.voicings(&PitchClassSet::from([0.0, 4.0, 7.0]), 36.0)?;
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.len(), second.len());
        assert_eq!(cache.len(), 1);

        let other_range = cache.voicings(&PitchClassSet::from([0.0, 4.0, 7.0]), 48.0)?;
        assert!(other_range.len() > first.len());
        assert_eq!(cache.len(), 2);
        Ok(())
    }

    #[test]
    fn voice_wraps_index() -> Result<()> {
        let mut cache = VoicingCache::new();
        let chord = PitchClassSet::from([0.0, 7.0]);
        let count = cache.voicings(&chord, 24.0)?.len() as i64;
        assert_eq!(cache.voice(&chord, 0, 24.0)?, cache.voice(&chord, count, 24.0)?);
        assert_eq!(cache.voice(&chord, -1, 24.0)?, cache.voice(&chord, count - 1, 24.0)?);
        Ok(())
    }

    #[test]
    fn degenerate_chords() {
        let mut cache = VoicingCache::new();
        assert!(matches!(
            cache.voicings(&PitchClassSet::default(), 60.0),
            Err(Error::EmptyChord)
        ));
        assert!(matches!(
            cache.voicings(&PitchClassSet::from([0.0, 7.0]), 5.0),
            Err(Error::NoVoicing { .. })
        ));
        assert!(cache.is_empty());
    }
}
