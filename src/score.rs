//! Output events and the time ordered score they get written to.

use std::fmt::Display;

use derive_more::{Deref, Display, From, Into};

use crate::pitch_class::Pitch;

// -------------------------------------------------------------------------------------------------

pub mod writer;

// -------------------------------------------------------------------------------------------------

/// Id to refer to a specific instrument in an [`OutputEvent`]. Also serves as the event's channel.
#[derive(Copy, Clone, Debug, Display, Deref, From, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstrumentId(usize);

/// MIDI note-on status, the status of all generated events.
pub const NOTE_ON_STATUS: u8 = 144;

// -------------------------------------------------------------------------------------------------

/// A single note of a realized chord.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputEvent {
    /// Onset in seconds.
    pub time: f64,
    /// Duration in seconds.
    pub duration: f64,
    pub status: u8,
    pub instrument: InstrumentId,
    pub key: Pitch,
    pub velocity: f64,
    pub pan: f64,
}

impl OutputEvent {
    /// Time in seconds at which the event ends.
    pub fn off_time(&self) -> f64 {
        self.time + self.duration
    }

    /// Channel of the event: events on the same channel and key get tied when merging.
    pub fn channel(&self) -> InstrumentId {
        self.instrument
    }
}

impl Display for OutputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "i: {:3}  t: {:9.4}  d: {:9.4}  s: {:3}  k: {:5.2}  v: {:5.2}  p: {:5.2}",
            self.instrument, self.time, self.duration, self.status, self.key, self.velocity, self.pan
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// Time ordered sequence of [`OutputEvent`]s.
///
/// Events with the same onset keep the order in which they got appended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Score {
    events: Vec<OutputEvent>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new event, keeping the score sorted by onset time.
    pub fn append(&mut self, event: OutputEvent) {
        let index = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(index, event);
    }

    /// Iterate all events in time order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputEvent> {
        self.events.iter()
    }

    /// Read-only access to all events in time order.
    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Tie temporally overlapping events of the same key and channel into single events.
    ///
    /// An event absorbs each later event with the same key and channel which starts before the
    /// event ends, extending its duration to cover the absorbed event. The scan for an event
    /// stops at the first later event with the same key and channel that starts at or after its
    /// end. Returns the number of removed events.
    pub fn merge_overlapping(&mut self) -> usize {
        let count = self.events.len();
        let mut deleted = vec![false; count];
        for sooner in 0..count {
            if deleted[sooner] {
                continue;
            }
            let mut sooner_ends = self.events[sooner].off_time();
            for later in sooner + 1..count {
                if deleted[later] {
                    continue;
                }
                let (head, tail) = self.events.split_at_mut(later);
                let (sooner_event, later_event) = (&mut head[sooner], &tail[0]);
                if later_event.key != sooner_event.key
                    || later_event.channel() != sooner_event.channel()
                {
                    continue;
                }
                if later_event.time >= sooner_ends {
                    break;
                }
                log::trace!("Tie {} with {}", sooner_event, later_event);
                if later_event.off_time() > sooner_ends {
                    sooner_event.duration = later_event.off_time() - sooner_event.time;
                    sooner_ends = sooner_event.off_time();
                }
                deleted[later] = true;
            }
        }
        let mut index = 0;
        self.events.retain(|_| {
            let keep = !deleted[index];
            index += 1;
            keep
        });
        count - self.events.len()
    }
}

impl<'a> IntoIterator for &'a Score {
    type Item = &'a OutputEvent;
    type IntoIter = std::slice::Iter<'a, OutputEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn note(time: f64, duration: f64, instrument: usize, key: f64) -> OutputEvent {
        OutputEvent {
            time,
            duration,
            status: NOTE_ON_STATUS,
            instrument: InstrumentId::from(instrument),
            key,
            velocity: 60.0,
            pan: 0.0,
        }
    }

    /// Union of `[time, off_time)` spans of all events with the given key and channel.
    fn coverage(score: &Score, instrument: usize, key: f64) -> Vec<(f64, f64)> {
        let mut spans: Vec<(f64, f64)> = vec![];
        for event in score
            .iter()
            .filter(|e| e.key == key && *e.instrument == instrument)
        {
            match spans.last_mut() {
                Some(last) if event.time <= last.1 => last.1 = last.1.max(event.off_time()),
                _ => spans.push((event.time, event.off_time())),
            }
        }
        spans
    }

    #[test]
    fn append_keeps_time_order() {
        let mut score = Score::new();
        score.append(note(2.0, 1.0, 0, 60.0));
        score.append(note(0.0, 1.0, 0, 60.0));
        score.append(note(2.0, 1.0, 1, 64.0));
        score.append(note(1.0, 1.0, 0, 60.0));
        assert_eq!(
            score.iter().map(|e| (e.time, *e.instrument)).collect::<Vec<_>>(),
            vec![(0.0, 0), (1.0, 0), (2.0, 0), (2.0, 1)]
        );
    }

    #[test]
    fn merge_ties_overlapping_notes() {
        let mut score = Score::new();
        score.append(note(0.0, 1.5, 0, 60.0));
        score.append(note(0.0, 1.0, 1, 64.0));
        score.append(note(1.0, 1.5, 0, 60.0));
        score.append(note(1.0, 1.0, 1, 64.0));
        score.append(note(2.0, 0.25, 0, 60.0));
        score.append(note(3.0, 1.0, 0, 60.0));
        assert_eq!(score.merge_overlapping(), 2);
        assert_eq!(
            score.events(),
            &[
                note(0.0, 2.5, 0, 60.0),
                note(0.0, 1.0, 1, 64.0),
                // abutting notes are not tied
                note(1.0, 1.0, 1, 64.0),
                note(3.0, 1.0, 0, 60.0),
            ]
        );
    }

    #[test]
    fn merge_never_shortens() {
        let mut score = Score::new();
        score.append(note(0.0, 4.0, 0, 60.0));
        score.append(note(1.0, 1.0, 0, 60.0));
        assert_eq!(score.merge_overlapping(), 1);
        assert_eq!(score.events(), &[note(0.0, 4.0, 0, 60.0)]);
    }

    #[test]
    fn merge_invariants() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x7e57);
        for _ in 0..50 {
            let mut score = Score::new();
            for _ in 0..40 {
                score.append(note(
                    rng.random_range(0..32) as f64 * 0.25,
                    rng.random_range(1..8) as f64 * 0.25,
                    rng.random_range(0..2),
                    60.0 + rng.random_range(0..3) as f64,
                ));
            }
            let original = score.clone();
            score.merge_overlapping();
            assert!(score.len() <= original.len());
            for instrument in 0..2 {
                for key in [60.0, 61.0, 62.0] {
                    assert_eq!(
                        coverage(&score, instrument, key),
                        coverage(&original, instrument, key)
                    );
                }
            }
            let merged = score.clone();
            assert_eq!(score.merge_overlapping(), 0);
            assert_eq!(score, merged);
        }
    }
}
