//! Human-readable report sink.
//!
//! One line per report, as an operator reads them on a serial terminal:
//!
//! ```text
//! read: 8421
//! read average: 8419.35
//! get value: 8419.40
//! get units: 8419.4
//! scale: 2280.00
//! 12.3
//! ```
//!
//! `T` produces no line.  Errors are written as `error: ...` on the same
//! channel.

use std::io::Write;

use log::warn;

use crate::app::events::{Diagnostic, Report};
use crate::app::ports::ReportSink;

pub struct TextReportSink<W> {
    out: W,
    units_decimals: usize,
}

impl<W: Write> TextReportSink<W> {
    pub fn new(out: W, units_decimals: usize) -> Self {
        Self { out, units_decimals }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a report as its output line, or `None` for silent reports.
pub fn render(report: &Report, units_decimals: usize) -> Option<String> {
    let line = match report {
        Report::Diagnostic(d) => match d {
            Diagnostic::Raw(raw) => format!("{}: {}", d.label(), raw),
            Diagnostic::Average(v) | Diagnostic::Value(v) => format!("{}: {:.2}", d.label(), v),
            Diagnostic::Units(v) => format!("{}: {:.*}", d.label(), units_decimals, v),
        },
        Report::ScaleSet { scale } => format!("scale: {:.2}", scale),
        Report::Units { units, .. } => format!("{:.*}", units_decimals, units),
        Report::RawAverage { raw, .. } => format!("{:.2}", raw),
        Report::Tared { .. } => return None,
        Report::Error { error } => format!("error: {}", error),
    };
    Some(line)
}

impl<W: Write> ReportSink for TextReportSink<W> {
    fn emit(&mut self, report: &Report) {
        let Some(line) = render(report, self.units_decimals) else {
            return;
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("Report write failed: {}", e);
        }
    }
}
