//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WeighingInstrument / CommandLoop (domain)
//! ```
//!
//! Driven adapters (the HX711 driver, the UART, report sinks) implement
//! these traits.  The domain consumes them via generics, so the instrument
//! never touches hardware directly and runs unchanged against mocks.

use crate::error::SensorError;

use super::events::Report;

// ───────────────────────────────────────────────────────────────
// Acquisition port (driven adapter: transducer → domain)
// ───────────────────────────────────────────────────────────────

/// The raw-ADC acquisition capability owned by the instrument.
///
/// `read_raw` is `while !is_ready() { yield_now() }` followed by one
/// `read_conversion()`.
pub trait AdcChannel {
    /// Whether a conversion is ready to be clocked out.
    fn is_ready(&mut self) -> Result<bool, SensorError>;

    /// Clock out one signed conversion.  Only valid after `is_ready()`.
    fn read_conversion(&mut self) -> Result<i32, SensorError>;

    /// Called between readiness polls.  Drivers use it to pace polling.
    fn yield_now(&mut self) {}
}

impl<T: AdcChannel + ?Sized> AdcChannel for &mut T {
    fn is_ready(&mut self) -> Result<bool, SensorError> {
        (**self).is_ready()
    }

    fn read_conversion(&mut self) -> Result<i32, SensorError> {
        (**self).read_conversion()
    }

    fn yield_now(&mut self) {
        (**self).yield_now();
    }
}

// ───────────────────────────────────────────────────────────────
// Serial input port (driving adapter: operator → domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented command input.
pub trait SerialPort {
    /// Next pending byte, or `None` if nothing has arrived.
    /// Must not block for longer than [`read_timeout_ms`](Self::read_timeout_ms).
    fn read_byte(&mut self) -> Option<u8>;

    /// Longest an empty `read_byte` waits, in milliseconds.  The command
    /// loop converts the argument idle timeout into polls with it.
    fn read_timeout_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Report sink port (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// The command loop emits every [`Report`] through this port.  Adapters
/// decide how it looks on the wire (text line, JSON, log record).
pub trait ReportSink {
    fn emit(&mut self, report: &Report);
}
