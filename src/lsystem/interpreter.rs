//! Interpretation of a production as a sequence of turtle commands.

use derive_more::Deref;

use crate::{
    error::{Error, Result},
    group::contextual_transpose,
    lsystem::command::Command,
    oracle::VoiceLeadingOracle,
    pitch_class::{Pitch, PitchClassSet},
    turtle::Turtle,
};

// -------------------------------------------------------------------------------------------------

/// An immutable copy of the turtle, captured by a `W` or `WC` command.
#[derive(Clone, Debug, PartialEq, Deref)]
pub struct CapturedChord(Turtle);

impl CapturedChord {
    pub fn new(turtle: Turtle) -> Self {
        Self(turtle)
    }

    pub fn into_turtle(self) -> Turtle {
        self.0
    }
}

// -------------------------------------------------------------------------------------------------

/// Runs commands against a single turtle, capturing chords.
///
/// The modality, the stabilizer of contextual transpositions, belongs to the interpreter and
/// is not affected by the turtle stack.
#[derive(Debug)]
pub struct Interpreter<'a> {
    turtle: Turtle,
    stack: Vec<Turtle>,
    modality: PitchClassSet,
    chords: Vec<CapturedChord>,
    oracle: &'a mut dyn VoiceLeadingOracle,
}

impl<'a> Interpreter<'a> {
    /// Generator of the transpositions and inversions scanned by `Q`.
    pub const CONTEXTUAL_GENERATOR: f64 = 1.0;

    pub fn new(oracle: &'a mut dyn VoiceLeadingOracle) -> Self {
        Self {
            turtle: Turtle::new(),
            stack: Vec::new(),
            modality: PitchClassSet::default(),
            chords: Vec::new(),
            oracle,
        }
    }

    /// The live turtle.
    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    /// Number of pushed turtles.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn modality(&self) -> &PitchClassSet {
        &self.modality
    }

    /// Chords captured so far, in emission order.
    pub fn chords(&self) -> &[CapturedChord] {
        &self.chords
    }

    pub fn into_chords(self) -> Vec<CapturedChord> {
        self.chords
    }

    /// Parse and run all whitespace separated tokens of the production.
    pub fn interpret(&mut self, production: &str) -> Result<()> {
        for token in production.split_whitespace() {
            let command = Command::parse(token);
            log::debug!("Command: {} -> {:?}", token, command);
            self.execute(token, command)?;
            log::trace!("Turtle: {}", self.turtle);
        }
        Ok(())
    }

    /// Run a single command. `token` is the text the command got parsed from.
    pub fn execute(&mut self, token: &str, command: Command) -> Result<()> {
        match command {
            Command::Push => self.stack.push(self.turtle.clone()),
            Command::Pop => match self.stack.pop() {
                Some(turtle) => self.turtle = turtle,
                None => log::warn!("Ignoring '{}': turtle stack is empty", token),
            },
            Command::Duration(scaling) => self.turtle.scale_duration(scaling),
            Command::Instrument { voice, instrument } => {
                log::debug!("Assigning instrument {} to voice {}", instrument, voice);
                self.turtle.assign_instrument(voice, instrument);
            }
            Command::Exchange => self.turtle.exchange(),
            Command::Loudness(scaling) => self.turtle.scale_loudness(scaling),
            Command::Overlap(overlap) => self.turtle.set_overlap(overlap),
            Command::Prime(pitch_classes) => {
                let pitch_classes = self
                    .prime(&pitch_classes)
                    .map_err(|source| Error::Command {
                        token: token.to_string(),
                        source,
                    })?;
                self.turtle.set_pitch_classes(pitch_classes.clone());
                self.modality = pitch_classes;
            }
            Command::ContextualTranspose(n) => {
                match contextual_transpose(
                    &self.turtle.pitch_classes,
                    n,
                    &self.modality,
                    Self::CONTEXTUAL_GENERATOR,
                ) {
                    Some(pitch_classes) => self.turtle.set_pitch_classes(pitch_classes),
                    None => log::debug!(
                        "{} is neither a T-form nor an I-form of {}",
                        self.turtle.pitch_classes,
                        self.modality
                    ),
                }
            }
            Command::Range(range) => self.turtle.set_range(range),
            Command::Set(pitch_classes) => {
                self.modality = pitch_classes.clone();
                self.turtle.set_pitch_classes(pitch_classes);
            }
            Command::Transpose(n) => self.turtle.transpose(n),
            Command::Revoice(n) => self.turtle.revoice(n),
            Command::Write { copies, voice_lead } => {
                let mut chord = self.turtle.clone();
                chord.voice_lead = voice_lead;
                for _ in 0..copies {
                    self.chords.push(CapturedChord::new(chord.clone()));
                }
            }
            Command::Unknown => (),
        }
        Ok(())
    }

    /// Pitch-classes of the chord a `P` command moves to: the untransposed prime form of the
    /// given chord when the turtle has no chord yet, else the closest voice-leading from the
    /// turtle's chord to the given chord.
    fn prime(&mut self, pitch_classes: &PitchClassSet) -> anyhow::Result<PitchClassSet> {
        let classification = self.oracle.classify(pitch_classes)?;
        let range = self.turtle.range;
        let pitches = if self.turtle.pitch_classes.is_empty() {
            self.oracle
                .realize_at_voicing(&classification.prime_form, 0.0, 0, range)?
        } else {
            let from: Vec<Pitch> = self.turtle.pitch_classes.iter().copied().collect();
            self.oracle.lead_voices(&from, pitch_classes, range, true)?
        };
        log::debug!(
            "New chord {} from prime form {} of a chord at transposition {}",
            PitchClassSet::from_pitches(&pitches),
            classification.prime_form,
            classification.transposition
        );
        Ok(PitchClassSet::from_pitches(&pitches))
    }
}

// -------------------------------------------------------------------------------------------------
