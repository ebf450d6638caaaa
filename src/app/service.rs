//! Command loop — the single-threaded control core.
//!
//! [`CommandLoop`] owns the [`WeighingInstrument`] and the
//! [`CommandParser`].  Each poll consumes at most one input byte; a
//! recognised command runs to completion and emits its report before the
//! next byte is looked at.
//!
//! ```text
//!  SerialPort ──▶ ┌────────────────────────────┐ ──▶ ReportSink
//!                 │        CommandLoop          │
//!  AdcChannel ◀──│  Parser · WeighingInstrument │
//!                 └────────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::InstrumentConfig;
use crate::error::InstrumentError;
use crate::instrument::WeighingInstrument;

use super::commands::{Command, CommandParser, Parsed};
use super::events::{Diagnostic, Report};
use super::ports::{AdcChannel, ReportSink, SerialPort};

/// Averaging counts and timeouts the loop runs with.
#[derive(Debug, Clone, Copy)]
struct LoopSettings {
    command_samples: u32,
    startup_average_samples: u32,
    startup_value_samples: u32,
    startup_units_samples: u32,
    argument_idle_ms: Option<u32>,
}

impl From<&InstrumentConfig> for LoopSettings {
    fn from(c: &InstrumentConfig) -> Self {
        Self {
            command_samples: c.command_samples,
            startup_average_samples: c.startup_average_samples,
            startup_value_samples: c.startup_value_samples,
            startup_units_samples: c.startup_units_samples,
            argument_idle_ms: c.argument_idle_ms,
        }
    }
}

pub struct CommandLoop<C> {
    instrument: WeighingInstrument<C>,
    parser: CommandParser,
    settings: LoopSettings,
    commands_handled: u64,
}

impl<C: AdcChannel> CommandLoop<C> {
    pub fn new(instrument: WeighingInstrument<C>, config: &InstrumentConfig) -> Self {
        Self {
            instrument,
            parser: CommandParser::new(),
            settings: LoopSettings::from(config),
            commands_handled: 0,
        }
    }

    // ── Startup ───────────────────────────────────────────────

    /// One raw read, one average, one value and one unit reading, each
    /// reported with its label.  A failing step is reported and skipped.
    pub fn run_startup(&mut self, sink: &mut impl ReportSink) {
        info!("Startup diagnostic");
        let s = self.settings;

        let raw = self.instrument.read_raw().map(Diagnostic::Raw);
        report_step(raw, sink);
        let average = self
            .instrument
            .read_average(s.startup_average_samples)
            .map(Diagnostic::Average);
        report_step(average, sink);
        let value = self
            .instrument
            .get_value(s.startup_value_samples)
            .map(Diagnostic::Value);
        report_step(value, sink);
        let units = self
            .instrument
            .get_units(s.startup_units_samples)
            .map(Diagnostic::Units);
        report_step(units, sink);
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Consume at most one byte.  Returns `true` if a byte was read.
    pub fn poll(&mut self, serial: &mut impl SerialPort, sink: &mut impl ReportSink) -> bool {
        match serial.read_byte() {
            Some(byte) => {
                for parsed in self.parser.feed(byte) {
                    self.handle(parsed, sink);
                }
                true
            }
            None => {
                let limit = self
                    .settings
                    .argument_idle_ms
                    .map(|ms| idle_poll_limit(ms, serial.read_timeout_ms()));
                if let Some(parsed) = self.parser.idle(limit) {
                    self.handle(parsed, sink);
                }
                false
            }
        }
    }

    /// Complete a pending `C` argument as if its terminator had arrived.
    pub fn flush(&mut self, sink: &mut impl ReportSink) {
        if let Some(parsed) = self.parser.flush() {
            self.handle(parsed, sink);
        }
    }

    /// Poll forever.
    pub fn run(&mut self, serial: &mut impl SerialPort, sink: &mut impl ReportSink) -> ! {
        info!("Entering command loop");
        loop {
            self.poll(serial, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Execute one command synchronously and report the outcome.
    pub fn dispatch(&mut self, cmd: Command, sink: &mut impl ReportSink) {
        debug!("Command {:?}", cmd);
        self.commands_handled += 1;
        let samples = self.settings.command_samples;

        let outcome = match cmd {
            Command::Calibrate(value) => self
                .instrument
                .set_scale(value)
                .map(|()| Report::ScaleSet { scale: self.instrument.scale() }),
            Command::ReadUnits => self
                .instrument
                .get_units(samples)
                .map(|units| Report::Units { units, samples }),
            Command::Tare => self
                .instrument
                .tare()
                .map(|()| Report::Tared { offset: self.instrument.offset() }),
            Command::ReadAverage => self
                .instrument
                .read_average(samples)
                .map(|raw| Report::RawAverage { raw, samples }),
        };

        match outcome {
            Ok(report) => sink.emit(&report),
            Err(e) => {
                warn!("Command {:?} failed: {}", cmd, e);
                sink.emit(&Report::Error { error: e.into() });
            }
        }
    }

    fn handle(&mut self, parsed: Parsed, sink: &mut impl ReportSink) {
        match parsed {
            Parsed::Command(cmd) => self.dispatch(cmd, sink),
            Parsed::Rejected(e) => {
                warn!("Rejected command argument: {}", e);
                sink.emit(&Report::Error { error: e.into() });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn instrument(&self) -> &WeighingInstrument<C> {
        &self.instrument
    }

    pub fn instrument_mut(&mut self) -> &mut WeighingInstrument<C> {
        &mut self.instrument
    }

    /// Commands executed since construction (rejected arguments excluded).
    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    /// True while the loop is waiting for the rest of a `C` argument.
    pub fn awaiting_argument(&self) -> bool {
        self.parser.is_collecting()
    }
}

/// Empty polls that cover at least `idle_ms` when each waits
/// `read_timeout_ms`.  Never less than one.
pub fn idle_poll_limit(idle_ms: u32, read_timeout_ms: u32) -> u32 {
    idle_ms.div_ceil(read_timeout_ms.max(1)).max(1)
}

fn report_step(step: Result<Diagnostic, InstrumentError>, sink: &mut impl ReportSink) {
    match step {
        Ok(d) => sink.emit(&Report::Diagnostic(d)),
        Err(e) => {
            warn!("Startup step failed: {}", e);
            sink.emit(&Report::Error { error: e.into() });
        }
    }
}
