//! Outbound reports.
//!
//! The [`CommandLoop`](super::service::CommandLoop) emits these through the
//! [`ReportSink`](super::ports::ReportSink) port.  Adapters on the other
//! side render them for the operator.

use serde::Serialize;

use crate::error::Error;

/// Structured results of commands and the startup diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Report {
    /// One labelled step of the startup diagnostic.
    Diagnostic(Diagnostic),

    /// `C`: the new scale factor.
    ScaleSet { scale: f64 },

    /// `R`: a tare-corrected, scaled reading.
    Units { units: f64, samples: u32 },

    /// `A`: an averaged raw reading.
    RawAverage { raw: f64, samples: u32 },

    /// `T`: the new tare offset.  Text output stays silent.
    Tared { offset: i32 },

    /// A command failed; the loop keeps running.
    Error { error: Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "step", content = "value", rename_all = "snake_case")]
pub enum Diagnostic {
    Raw(i32),
    Average(f64),
    Value(f64),
    Units(f64),
}

impl Diagnostic {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Raw(_) => "read",
            Self::Average(_) => "read average",
            Self::Value(_) => "get value",
            Self::Units(_) => "get units",
        }
    }

    /// The measured quantity, without its label.
    pub fn value(&self) -> f64 {
        match *self {
            Self::Raw(raw) => f64::from(raw),
            Self::Average(v) | Self::Value(v) | Self::Units(v) => v,
        }
    }
}
