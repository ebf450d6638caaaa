//! Instrument configuration parameters
//!
//! All tunable parameters for the weighing instrument and its command loop.
//! Calibration itself (offset, scale) is runtime state and is not persisted;
//! `initial_scale` only seeds it at boot.

use serde::{Deserialize, Serialize};

use crate::drivers::hx711::Gain;
use crate::error::ConfigError;

/// How command results are written back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable lines, one per report.
    Text,
    /// One JSON object per line.
    Json,
    /// Through the `log` facade.
    Log,
}

/// Core instrument configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    // --- Averaging ---
    /// Samples averaged by `tare()`.
    pub tare_samples: u32,
    /// Samples averaged by the `R` and `A` commands.
    pub command_samples: u32,
    /// Samples for the startup `read_average` diagnostic.
    pub startup_average_samples: u32,
    /// Samples for the startup `get_value` diagnostic.
    pub startup_value_samples: u32,
    /// Samples for the startup `get_units` diagnostic.
    pub startup_units_samples: u32,

    // --- Calibration ---
    /// Scale factor in effect before the first `C` command.
    pub initial_scale: f64,

    // --- Timing ---
    /// Not-ready polls tolerated before `DeviceTimeout`; `None` waits forever.
    pub ready_timeout_polls: Option<u32>,
    /// Silence (milliseconds) after which a partially received `C` argument
    /// is taken as complete.
    pub argument_idle_ms: Option<u32>,
    /// Delay between readiness polls of the ADC (microseconds).
    pub poll_interval_us: u32,

    // --- Converter ---
    /// HX711 channel/gain selection.
    pub gain: Gain,

    // --- Reporting ---
    /// Decimal places for unit readings.
    pub units_decimals: usize,
    pub report_format: ReportFormat,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            // Averaging
            tare_samples: 10,
            command_samples: 20,
            startup_average_samples: 20,
            startup_value_samples: 5,
            startup_units_samples: 5,

            // Calibration
            initial_scale: 1.0,

            // Timing
            ready_timeout_polls: None,
            argument_idle_ms: Some(1000),
            poll_interval_us: 100,

            // Converter
            gain: Gain::A128,

            // Reporting
            units_decimals: 1,
            report_format: ReportFormat::Text,
        }
    }
}

impl InstrumentConfig {
    /// Reject values the instrument cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            (self.tare_samples, "tare_samples must be positive"),
            (self.command_samples, "command_samples must be positive"),
            (self.startup_average_samples, "startup_average_samples must be positive"),
            (self.startup_value_samples, "startup_value_samples must be positive"),
            (self.startup_units_samples, "startup_units_samples must be positive"),
        ];
        if let Some((_, msg)) = counts.iter().find(|(n, _)| *n == 0) {
            return Err(ConfigError(*msg));
        }
        if !self.initial_scale.is_finite() || self.initial_scale == 0.0 {
            return Err(ConfigError("initial_scale must be finite and non-zero"));
        }
        if self.ready_timeout_polls == Some(0) {
            return Err(ConfigError("ready_timeout_polls must be positive when set"));
        }
        if self.argument_idle_ms == Some(0) {
            return Err(ConfigError("argument_idle_ms must be positive when set"));
        }
        Ok(())
    }
}
