//! Lindenmayer system whose symbols transform and write chords.

use crate::{
    error::Result,
    oracle::{voicelead::Voicelead, VoiceLeadingOracle},
    score::{writer::write_chords, Score},
    turtle::Turtle,
};

// -------------------------------------------------------------------------------------------------

pub mod command;
pub mod interpreter;
pub mod production;

use interpreter::{CapturedChord, Interpreter};
use production::{produce, RuleTable};

// -------------------------------------------------------------------------------------------------

/// Options of a [`ChordLindenmayer`] generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorOptions {
    /// Tie overlapping notes of the same key and channel after writing.
    pub merge_overlapping: bool,
    /// Not used yet: voice-leading always avoids parallel fifths.
    pub avoid_parallel_fifths: bool,
    /// Not used yet.
    pub tie_across_cells: bool,
    /// Not used yet: chord times are never rescaled.
    pub rescale_times: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            merge_overlapping: true,
            avoid_parallel_fifths: false,
            tie_across_cells: false,
            rescale_times: false,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Generates a score from an axiom and rewrite rules whose tokens are chord commands.
///
/// A generation run rewrites the axiom for the configured number of iterations, interprets the
/// production with a turtle, realizes all captured chords with the voice-leading oracle and,
/// when enabled, ties overlapping notes.
///
/// ### Example
/// ```rust
/// use chordlsys::prelude::*;
///
/// let mut generator = ChordLindenmayer::new();
/// generator.set_axiom("S(0,4,7) R60 A");
/// generator.add_rule("A", "WC T5 W");
/// generator.set_iteration_count(1);
/// let score = generator.generate().unwrap();
/// assert_eq!(score.len(), 6);
/// ```
#[derive(Debug)]
pub struct ChordLindenmayer {
    axiom: String,
    rules: RuleTable,
    iteration_count: usize,
    options: GeneratorOptions,
    oracle: Box<dyn VoiceLeadingOracle>,
    production: String,
    chords: Vec<CapturedChord>,
    score: Score,
}

impl Default for ChordLindenmayer {
    fn default() -> Self {
        Self::with_oracle(Box::new(Voicelead::new()))
    }
}

impl ChordLindenmayer {
    pub const DEFAULT_ITERATION_COUNT: usize = 3;

    /// Create a new generator which uses the default [`Voicelead`] oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new generator with a custom oracle.
    pub fn with_oracle(oracle: Box<dyn VoiceLeadingOracle>) -> Self {
        Self {
            axiom: String::new(),
            rules: RuleTable::new(),
            iteration_count: Self::DEFAULT_ITERATION_COUNT,
            options: GeneratorOptions::default(),
            oracle,
            production: String::new(),
            chords: Vec::new(),
            score: Score::new(),
        }
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn set_axiom<S: Into<String>>(&mut self, axiom: S) {
        self.axiom = axiom.into();
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Add or replace the rewrite rule for the given token.
    pub fn add_rule<T: Into<String>, R: Into<String>>(&mut self, token: T, replacement: R) {
        self.rules.add_rule(token, replacement);
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    /// Set the number of rewrite generations. Productions can grow exponentially with it.
    pub fn set_iteration_count(&mut self, iteration_count: usize) {
        self.iteration_count = iteration_count;
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GeneratorOptions) {
        self.options = options;
    }

    /// The production of the last generation run.
    pub fn production(&self) -> &str {
        &self.production
    }

    /// Chords captured in the last generation run.
    pub fn captured_chords(&self) -> &[CapturedChord] {
        &self.chords
    }

    /// Score of the last generation run.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Run all stages, replacing results of previous runs.
    ///
    /// Results are only kept when all stages succeed. A failed run leaves an empty production,
    /// no captured chords and an empty score behind.
    pub fn generate(&mut self) -> Result<&Score> {
        self.production.clear();
        self.chords.clear();
        self.score.clear();

        let production = produce(&self.axiom, &self.rules, self.iteration_count);
        log::info!(
            "Produced {} tokens in {} iterations",
            production.split_whitespace().count(),
            self.iteration_count
        );

        let mut interpreter = Interpreter::new(self.oracle.as_mut());
        interpreter.interpret(&production)?;
        let chords = interpreter.into_chords();
        log::info!("Captured {} chords", chords.len());

        let mut score = Score::new();
        let written: Vec<Turtle> = write_chords(&chords, self.oracle.as_mut(), &mut score)?;
        log::info!("Wrote {} chords with {} notes", written.len(), score.len());

        if self.options.merge_overlapping {
            let removed = score.merge_overlapping();
            log::info!("Tied {} notes, {} notes remain", removed, score.len());
        }

        self.production = production;
        self.chords = chords;
        self.score = score;
        Ok(&self.score)
    }
}

// -------------------------------------------------------------------------------------------------
