//! Load-cell weighing instrument.
//!
//! Owns the acquisition channel together with the calibration state:
//!
//! ```text
//!   units = (mean(raw_1 .. raw_n) - offset) / scale
//! ```
//!
//! `offset` is set by [`WeighingInstrument::tare`], `scale` by
//! [`WeighingInstrument::set_scale`].  Neither survives a restart.

use log::{debug, trace, warn};

use crate::app::ports::AdcChannel;
use crate::config::InstrumentConfig;
use crate::error::InstrumentError;

type Result<T> = core::result::Result<T, InstrumentError>;

pub struct WeighingInstrument<C> {
    channel: C,
    offset: i32,
    scale: f64,
    tare_samples: u32,
    ready_timeout_polls: Option<u32>,
}

impl<C: AdcChannel> WeighingInstrument<C> {
    /// Bind the instrument to its channel.  The offset starts at zero and
    /// the scale at `config.initial_scale`.
    pub fn new(channel: C, config: &InstrumentConfig) -> Self {
        Self {
            channel,
            offset: 0,
            scale: config.initial_scale,
            tare_samples: config.tare_samples,
            ready_timeout_polls: config.ready_timeout_polls,
        }
    }

    /// Wait for a conversion and return it uncorrected.
    ///
    /// Without a configured timeout this waits forever on a silent
    /// transducer.
    pub fn read_raw(&mut self) -> Result<i32> {
        let mut polls: u32 = 0;
        while !self.channel.is_ready()? {
            polls = polls.saturating_add(1);
            if let Some(limit) = self.ready_timeout_polls {
                if polls >= limit {
                    warn!("Load cell not ready after {} polls", polls);
                    return Err(InstrumentError::DeviceTimeout { polls });
                }
            }
            self.channel.yield_now();
        }
        let raw = self.channel.read_conversion()?;
        trace!("raw={}", raw);
        Ok(raw)
    }

    /// Unweighted mean of `samples` back-to-back raw reads.
    pub fn read_average(&mut self, samples: u32) -> Result<f64> {
        if samples == 0 {
            return Err(InstrumentError::NoSamples);
        }
        let mut sum: i64 = 0;
        for _ in 0..samples {
            sum += i64::from(self.read_raw()?);
        }
        Ok(sum as f64 / f64::from(samples))
    }

    /// Averaged reading minus the tare offset.
    pub fn get_value(&mut self, samples: u32) -> Result<f64> {
        Ok(self.read_average(samples)? - f64::from(self.offset))
    }

    /// Tare-corrected reading divided by the scale factor.
    pub fn get_units(&mut self, samples: u32) -> Result<f64> {
        Ok(self.get_value(samples)? / self.scale)
    }

    /// Take the current load as zero.
    pub fn tare(&mut self) -> Result<()> {
        let average = self.read_average(self.tare_samples)?;
        self.offset = average.round() as i32;
        debug!("Tare offset = {} ({} samples)", self.offset, self.tare_samples);
        Ok(())
    }

    /// Replace the scale factor.  Zero and non-finite values are rejected
    /// and the previous factor is kept.
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        if !scale.is_finite() || scale == 0.0 {
            warn!("Rejected scale {}", scale);
            return Err(InstrumentError::InvalidScale);
        }
        self.scale = scale;
        debug!("Scale = {}", scale);
        Ok(())
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}
