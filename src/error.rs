//! Unified error types for the weighing instrument.
//!
//! A single `Error` enum that every subsystem converts into, so the command
//! loop can report any failure the same way.  All variants are `Copy` and
//! `Serialize` so they can be handed to a report sink without allocation.

use core::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Error {
    /// A weighing operation failed.
    Instrument(InstrumentError),
    /// The numeric argument of a `C` command could not be parsed.
    Parse(ParseError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instrument(e) => write!(f, "instrument: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor (pin-level) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorError {
    /// Reading the DOUT line failed.
    DataPinRead,
    /// Driving the SCK line failed.
    ClockPinWrite,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataPinRead => write!(f, "data pin read failed"),
            Self::ClockPinWrite => write!(f, "clock pin write failed"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Instrument errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentError {
    /// The ADC never signalled a ready conversion within the poll budget.
    DeviceTimeout { polls: u32 },
    /// The acquisition channel reported a pin failure.
    Channel(SensorError),
    /// An averaged read was requested with zero samples.
    NoSamples,
    /// A zero or non-finite scale factor was rejected.
    InvalidScale,
}

impl fmt::Display for InstrumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceTimeout { polls } => {
                write!(f, "load cell not ready after {polls} polls")
            }
            Self::Channel(e) => write!(f, "channel: {e}"),
            Self::NoSamples => write!(f, "sample count must be positive"),
            Self::InvalidScale => write!(f, "scale must be finite and non-zero"),
        }
    }
}

impl std::error::Error for InstrumentError {}

impl From<SensorError> for InstrumentError {
    fn from(e: SensorError) -> Self {
        Self::Channel(e)
    }
}

impl From<InstrumentError> for Error {
    fn from(e: InstrumentError) -> Self {
        Self::Instrument(e)
    }
}

// ---------------------------------------------------------------------------
// Command argument errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseError {
    /// `C` was followed by no numeric characters.
    Empty,
    /// The collected characters do not form a number (e.g. `1.2.3`, `-`).
    Malformed,
    /// The literal exceeded the argument buffer.
    TooLong,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "missing scale value"),
            Self::Malformed => write!(f, "malformed scale value"),
            Self::TooLong => write!(f, "scale value too long"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A config field failed range validation.
/// The `&'static str` describes which field and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigError(pub &'static str);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;
