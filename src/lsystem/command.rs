//! Parsing of production tokens into turtle commands.

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::{
    chord::chord_pitch_classes, pitch_class::PitchClassSet, score::InstrumentId, turtle::Scaling,
};

// -------------------------------------------------------------------------------------------------

#[derive(Parser)]
#[grammar = "lsystem/command.pest"]
struct CommandParser {}

// -------------------------------------------------------------------------------------------------

/// A turtle command, parsed from a single production token.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `[`: push a copy of the turtle onto the stack.
    Push,
    /// `]`: replace the turtle with the top of the stack.
    Pop,
    /// `D*n`, `D/n`: scale the duration.
    Duration(Scaling),
    /// `Iv=i`: play voice `v` with instrument `i`.
    Instrument { voice: usize, instrument: InstrumentId },
    /// `K`: inversion by exchange.
    Exchange,
    /// `L*n`, `L/n`: scale the loudness.
    Loudness(Scaling),
    /// `On`: legato (n > 0) or staccato (n < 0) in seconds.
    Overlap(f64),
    /// `P=name`, `P(pcs)`: move to the given chord's prime form by voice-leading.
    Prime(PitchClassSet),
    /// `Qn`: contextual transposition.
    ContextualTranspose(f64),
    /// `Rn`: set the pitch range.
    Range(f64),
    /// `S(pcs)`: set the chord and the modality.
    Set(PitchClassSet),
    /// `Tn`: transposition.
    Transpose(f64),
    /// `V+n`, `V-n`: octavewise revoicing.
    Revoice(i64),
    /// `Wn` (voice-led) or `WCn` (fixed voicing): capture `n` tied copies of the turtle.
    Write { copies: usize, voice_lead: bool },
    /// Any token which is not a command. Has no effect.
    Unknown,
}

impl Command {
    /// Default transposition of `T` without an operand.
    pub const DEFAULT_TRANSPOSITION: f64 = 1.0;
    /// Default step of `V+` and `V-` without an operand.
    pub const DEFAULT_REVOICING: i64 = 1;

    /// Parse a production token. Tokens which are not valid commands map to
    /// [`Command::Unknown`].
    pub fn parse(token: &str) -> Self {
        match Self::try_parse(token) {
            Ok(command) => command,
            Err(err) => {
                // plain symbols, such as rule names, are expected here
                if token.len() > 1 && token.starts_with(|c: char| "[]DIKLOPQRSTVW".contains(c)) {
                    log::warn!("Ignoring malformed command '{}': {}", token, err);
                } else {
                    log::trace!("Ignoring token '{}'", token);
                }
                Command::Unknown
            }
        }
    }

    fn try_parse(token: &str) -> Result<Self, String> {
        let command = CommandParser::parse(Rule::command, token)
            .map_err(|err| err.to_string())?
            .next()
            .and_then(|command| command.into_inner().next())
            .ok_or_else(|| "empty command".to_string())?;
        match command.as_rule() {
            Rule::push => Ok(Command::Push),
            Rule::pop => Ok(Command::Pop),
            Rule::duration => Ok(Command::Duration(Self::parse_scaling(first_inner(command)?)?)),
            Rule::loudness => Ok(Command::Loudness(Self::parse_scaling(first_inner(command)?)?)),
            Rule::instrument => {
                let mut inner = command.into_inner();
                let voice = Self::parse_integer(inner.next())?;
                let instrument = Self::parse_integer(inner.next())?;
                Ok(Command::Instrument {
                    voice,
                    instrument: InstrumentId::from(instrument),
                })
            }
            Rule::exchange => Ok(Command::Exchange),
            Rule::overlap => Ok(Command::Overlap(parse_number(first_inner(command)?)?)),
            Rule::prime => Ok(Command::Prime(Self::parse_pitch_classes(first_inner(command)?)?)),
            Rule::contextual => {
                let n = parse_number(first_inner(command)?)?;
                Ok(Command::ContextualTranspose(n))
            }
            Rule::range => Ok(Command::Range(parse_number(first_inner(command)?)?)),
            Rule::set => Ok(Command::Set(Self::parse_pitch_classes(first_inner(command)?)?)),
            Rule::transpose => match command.into_inner().next() {
                Some(number) => Ok(Command::Transpose(parse_number(number)?)),
                None => Ok(Command::Transpose(Self::DEFAULT_TRANSPOSITION)),
            },
            Rule::revoice => {
                let step = first_inner(command)?;
                match step.as_rule() {
                    Rule::sign if step.as_str() == "-" => {
                        Ok(Command::Revoice(-Self::DEFAULT_REVOICING))
                    }
                    Rule::sign => Ok(Command::Revoice(Self::DEFAULT_REVOICING)),
                    _ => Ok(Command::Revoice(parse_number(step)?.round() as i64)),
                }
            }
            Rule::write => {
                let mut voice_lead = true;
                let mut copies = 1;
                for pair in command.into_inner() {
                    match pair.as_rule() {
                        Rule::fixed => voice_lead = false,
                        _ => copies = Self::parse_integer(Some(pair))?,
                    }
                }
                Ok(Command::Write { copies, voice_lead })
            }
            rule => Err(format!("unexpected rule {:?}", rule)),
        }
    }

    fn parse_scaling(pair: Pair<Rule>) -> Result<Scaling, String> {
        let mut inner = pair.into_inner();
        let operator = inner
            .next()
            .ok_or_else(|| "missing scaling operator".to_string())?;
        let factor = match inner.next() {
            Some(number) => parse_number(number)?,
            None => Scaling::DEFAULT_FACTOR,
        };
        match operator.as_rule() {
            Rule::multiply => Ok(Scaling::Multiply(factor)),
            _ => Ok(Scaling::Divide(factor)),
        }
    }

    fn parse_integer(pair: Option<Pair<Rule>>) -> Result<usize, String> {
        let pair = pair.ok_or_else(|| "missing integer".to_string())?;
        pair.as_str()
            .parse::<usize>()
            .map_err(|err| format!("invalid integer '{}': {}", pair.as_str(), err))
    }

    fn parse_pitch_classes(pair: Pair<Rule>) -> Result<PitchClassSet, String> {
        match pair.as_rule() {
            Rule::chord_name => chord_pitch_classes(pair.as_str()),
            Rule::number => Ok(PitchClassSet::new(vec![parse_number(pair)?])),
            _ => {
                let mut pitches = vec![];
                for numbers in pair.into_inner() {
                    for number in numbers.into_inner() {
                        pitches.push(parse_number(number)?);
                    }
                }
                Ok(PitchClassSet::new(pitches))
            }
        }
    }
}

fn first_inner(pair: Pair<Rule>) -> Result<Pair<Rule>, String> {
    let text = pair.as_str().to_string();
    pair.into_inner()
        .next()
        .ok_or_else(|| format!("missing operand in '{}'", text))
}

fn parse_number(pair: Pair<Rule>) -> Result<f64, String> {
    pair.as_str()
        .parse::<f64>()
        .map_err(|err| format!("invalid number '{}': {}", pair.as_str(), err))
}

// -------------------------------------------------------------------------------------------------
