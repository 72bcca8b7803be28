//! Default voice-leading oracle, based on exhaustive voicing enumeration.

use std::cmp::Ordering;

use anyhow::{anyhow, bail};

use crate::{
    group::transpose,
    oracle::{Classification, VoiceLeadingOracle},
    pitch_class::{compare_pitches, pc, Pitch, PitchClassSet},
    voicing::VoicingCache,
};

// -------------------------------------------------------------------------------------------------

fn lexicographic_order(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| a.total_cmp(b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

fn sorted(pitches: &[Pitch]) -> Vec<Pitch> {
    let mut pitches = pitches.to_vec();
    pitches.sort_by(compare_pitches);
    pitches
}

/// Summed absolute motion between two sorted chords. Chords with a different number of voices
/// get measured by the distance of each target pitch to its closest source pitch.
fn motion(from: &[Pitch], to: &[Pitch]) -> f64 {
    if from.len() == to.len() {
        from.iter().zip(to).map(|(f, t)| (t - f).abs()).sum()
    } else {
        to.iter()
            .map(|t| {
                from.iter()
                    .map(|f| (t - f).abs())
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    }
}

/// returns true if any two voices of the sorted chords form a perfect fifth (or compound fifth)
/// in both chords and move in the same direction.
fn has_parallel_fifths(from: &[Pitch], to: &[Pitch]) -> bool {
    if from.len() != to.len() {
        return false;
    }
    for lower in 0..from.len() {
        for upper in lower + 1..from.len() {
            let from_interval = pc((from[upper] - from[lower]).abs());
            let to_interval = pc((to[upper] - to[lower]).abs());
            if from_interval == 7.0 && to_interval == 7.0 {
                let lower_motion = to[lower] - from[lower];
                let upper_motion = to[upper] - from[upper];
                if lower_motion != 0.0 && lower_motion.signum() == upper_motion.signum() {
                    return true;
                }
            }
        }
    }
    false
}

// -------------------------------------------------------------------------------------------------

/// Oracle which classifies chords by transposition only and finds voice-leadings by scanning
/// all voicings of the target chord within range.
///
/// The prime form of a set is its lexicographically smallest transposition that starts on 0.
/// Realized chords are returned in ascending pitch order, so voice 0 is the bass.
#[derive(Debug, Clone, Default)]
pub struct Voicelead {
    cache: VoicingCache,
}

impl Voicelead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the voicings enumerated so far.
    pub fn cache(&self) -> &VoicingCache {
        &self.cache
    }
}

impl VoiceLeadingOracle for Voicelead {
    fn classify(&mut self, pitch_classes: &PitchClassSet) -> anyhow::Result<Classification> {
        let canonical = pitch_classes.canonical();
        canonical
            .iter()
            .map(|root| Classification {
                prime_form: transpose(&canonical, -root).canonical(),
                transposition: *root,
            })
            .reduce(|best, candidate| {
                match lexicographic_order(
                    candidate.prime_form.as_slice(),
                    best.prime_form.as_slice(),
                ) {
                    Ordering::Less => candidate,
                    _ => best,
                }
            })
            .ok_or_else(|| anyhow!("can not classify an empty pitch-class set"))
    }

    fn realize_at_voicing(
        &mut self,
        prime_form: &PitchClassSet,
        transposition: f64,
        voicing: i64,
        range: f64,
    ) -> anyhow::Result<Vec<Pitch>> {
        let pitch_classes = transpose(prime_form, transposition);
        let pitches = self.cache.voice(&pitch_classes, voicing, range)?;
        Ok(sorted(&pitches))
    }

    fn lead_voices(
        &mut self,
        from: &[Pitch],
        to: &PitchClassSet,
        range: f64,
        avoid_parallels: bool,
    ) -> anyhow::Result<Vec<Pitch>> {
        if from.is_empty() {
            bail!("can not lead voices from an empty chord to {}", to);
        }
        let from = sorted(from);
        let voicings = self.cache.voicings(to, range)?;
        let mut closest: Option<(Vec<Pitch>, f64)> = None;
        let mut closest_without_parallels: Option<(Vec<Pitch>, f64)> = None;
        for voicing in voicings.iter() {
            let voicing = sorted(voicing);
            let distance = motion(&from, &voicing);
            if avoid_parallels
                && !has_parallel_fifths(&from, &voicing)
                && closest_without_parallels
                    .as_ref()
                    .map_or(true, |(_, closest)| distance < *closest)
            {
                closest_without_parallels = Some((voicing.clone(), distance));
            }
            if closest
                .as_ref()
                .map_or(true, |(_, closest)| distance < *closest)
            {
                closest = Some((voicing, distance));
            }
        }
        closest_without_parallels
            .or(closest)
            .map(|(voicing, _)| voicing)
            .ok_or_else(|| anyhow!("no voicing of {} within range {}", to, range))
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn classification() -> anyhow::Result<()> {
        let mut oracle = Voicelead::new();
        let c_major = oracle.classify(&PitchClassSet::from([0.0, 4.0, 7.0]))?;
        assert_eq!(c_major.prime_form, PitchClassSet::from([0.0, 3.0, 8.0]));
        assert_eq!(c_major.transposition, 4.0);
        assert!(transpose(&c_major.prime_form, c_major.transposition)
            .same_content(&PitchClassSet::from([0.0, 4.0, 7.0])));

        let d_major = oracle.classify(&PitchClassSet::from([9.0, 2.0, 6.0]))?;
        assert_eq!(d_major.prime_form, c_major.prime_form);
        assert_eq!(d_major.transposition, 6.0);

        assert!(oracle.classify(&PitchClassSet::default()).is_err());
        Ok(())
    }

    #[test]
    fn realization() -> anyhow::Result<()> {
        let mut oracle = Voicelead::new();
        let prime = PitchClassSet::from([0.0, 3.0, 8.0]);
        assert_eq!(oracle.realize_at_voicing(&prime, 4.0, 0, 60.0)?, vec![0.0, 4.0, 7.0]);
        assert_eq!(oracle.realize_at_voicing(&prime, 4.0, 1, 60.0)?, vec![4.0, 7.0, 12.0]);
        assert_eq!(oracle.cache().len(), 1);
        Ok(())
    }

    #[test]
    fn minimal_motion() -> anyhow::Result<()> {
        let mut oracle = Voicelead::new();
        let g_major = PitchClassSet::from([7.0, 11.0, 2.0]);
        assert_eq!(
            oracle.lead_voices(&[48.0, 52.0, 55.0], &g_major, 60.0, false)?,
            vec![47.0, 50.0, 55.0]
        );
        assert!(oracle.lead_voices(&[], &g_major, 60.0, false).is_err());
        assert!(oracle
            .lead_voices(&[48.0], &PitchClassSet::default(), 60.0, false)
            .is_err());
        Ok(())
    }

    #[test]
    fn parallel_fifths() -> anyhow::Result<()> {
        let mut oracle = Voicelead::new();
        let fifth = PitchClassSet::from([2.0, 9.0]);
        assert_eq!(
            oracle.lead_voices(&[0.0, 7.0], &fifth, 24.0, false)?,
            vec![2.0, 9.0]
        );
        assert_eq!(
            oracle.lead_voices(&[0.0, 7.0], &fifth, 24.0, true)?,
            vec![9.0, 14.0]
        );
        // when every candidate moves in parallel, the closest one wins
        assert_eq!(
            oracle.lead_voices(&[0.0, 7.0], &PitchClassSet::from([2.0, 9.0]), 9.0, true)?,
            vec![2.0, 9.0]
        );
        Ok(())
    }
}
