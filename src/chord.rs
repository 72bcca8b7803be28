//! Chord names, as used by the `P=name` command, converted to pitch-class sets.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::{group::transpose, pitch_class::PitchClassSet};

// --------------------------------------------------------------------------------------------------

/// Chord suffixes with their aliases and intervals in semitones above the root.
const CHORD_SUFFIXES: &[(&[&str], &[u8])] = &[
    (&["", "M", "maj", "major"], &[0, 4, 7]),
    (&["aug", "+"], &[0, 4, 8]),
    (&["6", "M6"], &[0, 4, 7, 9]),
    (&["69"], &[0, 4, 7, 9, 14]),
    (&["M7", "maj7", "Δ7"], &[0, 4, 7, 11]),
    (&["M9", "maj9"], &[0, 4, 7, 11, 14]),
    (&["add9"], &[0, 4, 7, 14]),
    (&["7", "dom7"], &[0, 4, 7, 10]),
    (&["7b5"], &[0, 4, 6, 10]),
    (&["7#5"], &[0, 4, 8, 10]),
    (&["7b9"], &[0, 4, 7, 10, 13]),
    (&["9"], &[0, 4, 7, 10, 14]),
    (&["m", "min", "minor", "-"], &[0, 3, 7]),
    (&["o", "dim"], &[0, 3, 6]),
    (&["m6"], &[0, 3, 7, 9]),
    (&["m7b5", "ø"], &[0, 3, 6, 10]),
    (&["m7", "min7", "-7"], &[0, 3, 7, 10]),
    (&["m9"], &[0, 3, 7, 10, 14]),
    (&["o7", "dim7"], &[0, 3, 6, 9]),
    (&["mM7"], &[0, 3, 7, 11]),
    (&["5"], &[0, 7]),
    (&["sus2"], &[0, 2, 7]),
    (&["sus4"], &[0, 5, 7]),
    (&["7sus4"], &[0, 5, 7, 10]),
];

lazy_static! {
    static ref CHORD_TABLE: HashMap<&'static str, &'static [u8]> = CHORD_SUFFIXES
        .iter()
        .flat_map(|(names, intervals)| names.iter().map(move |name| (*name, *intervals)))
        .collect();
}

// --------------------------------------------------------------------------------------------------

/// return list of all known chord suffix names.
pub fn chord_names() -> String {
    let mut names = CHORD_TABLE
        .keys()
        .filter(|name| !name.is_empty())
        .map(|name| String::from(*name))
        .collect::<Vec<_>>();
    names.sort();
    names.join(", ")
}

/// Split a chord name into its root pitch-class and the remaining chord suffix.
fn parse_root(name: &str) -> Result<(u8, &str), String> {
    let mut chars = name.char_indices();
    let root = match chars.next() {
        Some((_, c)) => match c.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => {
                return Err(format!(
                    "invalid chord name '{}' - root note character '{}' is invalid.",
                    name, c
                ))
            }
        },
        None => return Err("invalid chord name - string is empty.".to_string()),
    };
    match chars.next() {
        Some((index, c @ ('#' | '♯'))) => Ok(((root + 1) % 12, &name[index + c.len_utf8()..])),
        Some((index, c @ ('b' | '♭'))) => Ok(((root + 11) % 12, &name[index + c.len_utf8()..])),
        Some((index, _)) => Ok((root, &name[index..])),
        None => Ok((root, "")),
    }
}

/// Convert a chord name such as `"C"`, `"Dm7"`, `"Bb7"` or `"f#'o7"` to its pitch-class set.
///
/// The name is a root note, optionally followed by `#` or `b`, followed by a suffix of the chord
/// table. The suffix may be separated by a `'`.
pub fn chord_pitch_classes(name: &str) -> Result<PitchClassSet, String> {
    let (root, suffix) = parse_root(name.trim())?;
    let suffix = suffix.strip_prefix('\'').unwrap_or(suffix);
    let intervals = CHORD_TABLE.get(suffix).ok_or_else(|| {
        format!(
            "Invalid chord identifier '{}'. Valid chords are: {}",
            suffix,
            chord_names()
        )
    })?;
    let intervals = PitchClassSet::new(intervals.iter().map(|i| *i as f64).collect());
    Ok(transpose(&intervals, root as f64))
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chord_string_conversion() -> Result<(), String> {
        assert!(chord_pitch_classes("").is_err());
        assert!(chord_pitch_classes("x").is_err());
        assert!(chord_pitch_classes("Cqwe").is_err());
        assert_eq!(
            chord_pitch_classes("C")?,
            PitchClassSet::from([0.0, 4.0, 7.0])
        );
        assert_eq!(
            chord_pitch_classes("Dm7")?,
            PitchClassSet::from([2.0, 5.0, 9.0, 0.0])
        );
        assert_eq!(
            chord_pitch_classes("Bb7")?,
            PitchClassSet::from([10.0, 2.0, 5.0, 8.0])
        );
        assert_eq!(
            chord_pitch_classes("f#'o7")?,
            PitchClassSet::from([6.0, 9.0, 0.0, 3.0])
        );
        assert_eq!(
            chord_pitch_classes("Csus4")?,
            PitchClassSet::from([0.0, 5.0, 7.0])
        );
        assert_eq!(
            chord_pitch_classes("GM9")?,
            PitchClassSet::from([7.0, 11.0, 2.0, 6.0, 9.0])
        );
        Ok(())
    }
}
