//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing every report to the `log` facade
//! (which goes to UART / USB-CDC on the device).  Useful when the command
//! channel and the console share a port and the operator reads the log.

use log::{info, warn};

use crate::app::events::Report;
use crate::app::ports::ReportSink;

/// Adapter that logs every [`Report`].
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, report: &Report) {
        match report {
            Report::Diagnostic(d) => info!("DIAG  | {} = {}", d.label(), d.value()),
            Report::ScaleSet { scale } => info!("SCALE | {}", scale),
            Report::Units { units, samples } => info!("UNITS | {:.1} (n={})", units, samples),
            Report::RawAverage { raw, samples } => info!("RAW   | {:.2} (n={})", raw, samples),
            Report::Tared { offset } => info!("TARE  | offset={}", offset),
            Report::Error { error } => warn!("ERROR | {}", error),
        }
    }
}
