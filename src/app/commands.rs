//! Inbound commands and the byte-stream parser that produces them.
//!
//! | Byte | Command                  |
//! |------|--------------------------|
//! | `C`  | [`Command::Calibrate`] (float literal follows) |
//! | `R`  | [`Command::ReadUnits`]   |
//! | `T`  | [`Command::Tare`]        |
//! | `A`  | [`Command::ReadAverage`] |
//!
//! Every other byte in the idle state is discarded without output.

use heapless::{String, Vec};

use crate::error::ParseError;

/// Longest accepted `C` literal, in characters.
pub const MAX_ARGUMENT_LEN: usize = 24;

/// Commands the operator can send to the instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set the scale factor.
    Calibrate(f64),
    /// Report the unit-scaled reading.
    ReadUnits,
    /// Re-zero at the current load.
    Tare,
    /// Report the averaged raw reading.
    ReadAverage,
}

impl Command {
    /// Classify a command byte received in the idle state.
    /// `C` is excluded because it needs an argument.
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'R' => Some(Self::ReadUnits),
            b'T' => Some(Self::Tare),
            b'A' => Some(Self::ReadAverage),
            _ => None,
        }
    }
}

/// Output of the parser for one input byte or idle poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Command(Command),
    Rejected(ParseError),
}

/// At most two results per byte: a finished `C` argument and the command
/// byte that terminated it.
pub type ParsedBatch = Vec<Parsed, 2>;

enum State {
    Idle,
    Argument {
        literal: String<MAX_ARGUMENT_LEN>,
        overflowed: bool,
        idle_polls: u32,
    },
}

/// Byte-at-a-time command classifier.
pub struct CommandParser {
    state: State,
}

impl CommandParser {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// True while a `C` argument is being collected.
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Argument { .. })
    }

    /// Feed one received byte.
    pub fn feed(&mut self, byte: u8) -> ParsedBatch {
        let mut out = ParsedBatch::new();

        if let State::Argument {
            literal,
            overflowed,
            idle_polls,
        } = &mut self.state
        {
            *idle_polls = 0;

            if is_literal_byte(byte) {
                if literal.push(byte as char).is_err() {
                    *overflowed = true;
                }
                return out;
            }
            if literal.is_empty() && !*overflowed && matches!(byte, b' ' | b'\t') {
                return out;
            }

            // Any other byte ends the literal.
            let _ = out.push(self.finish_argument());
            if matches!(byte, b'\r' | b'\n') {
                return out;
            }
        }

        if let Some(parsed) = self.classify(byte) {
            let _ = out.push(parsed);
        }
        out
    }

    /// Account for one poll with no input.  Completes a pending argument
    /// once `limit` consecutive idle polls have passed.
    pub fn idle(&mut self, limit: Option<u32>) -> Option<Parsed> {
        let State::Argument { idle_polls, .. } = &mut self.state else {
            return None;
        };
        let limit = limit?;
        *idle_polls = idle_polls.saturating_add(1);
        if *idle_polls < limit {
            return None;
        }
        Some(self.finish_argument())
    }

    /// Complete a pending argument immediately (end of input).
    pub fn flush(&mut self) -> Option<Parsed> {
        self.is_collecting().then(|| self.finish_argument())
    }

    fn classify(&mut self, byte: u8) -> Option<Parsed> {
        if byte == b'C' {
            self.state = State::Argument {
                literal: String::new(),
                overflowed: false,
                idle_polls: 0,
            };
            return None;
        }
        Command::from_byte(byte).map(Parsed::Command)
    }

    fn finish_argument(&mut self) -> Parsed {
        match core::mem::replace(&mut self.state, State::Idle) {
            State::Idle => Parsed::Rejected(ParseError::Empty),
            State::Argument { overflowed: true, .. } => Parsed::Rejected(ParseError::TooLong),
            State::Argument { literal, .. } => match parse_literal(&literal) {
                Ok(value) => Parsed::Command(Command::Calibrate(value)),
                Err(e) => Parsed::Rejected(e),
            },
        }
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_literal_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'.' | b'-' | b'+')
}

fn parse_literal(literal: &str) -> Result<f64, ParseError> {
    if literal.is_empty() {
        return Err(ParseError::Empty);
    }
    literal.parse::<f64>().map_err(|_| ParseError::Malformed)
}
