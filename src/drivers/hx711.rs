//! HX711 24-bit load-cell ADC driver.
//!
//! Bit-banged over two GPIOs: `SCK` (output) and `DOUT` (input).  `DOUT`
//! drops low when a conversion is ready; the 24 data bits are then clocked
//! out MSB first, followed by 1–3 extra pulses that select the channel and
//! gain of the *next* conversion.
//!
//! Generic over the `embedded-hal` 1.0 pin and delay traits so the same
//! code runs on ESP-IDF `PinDriver`s and on host-side mock pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::ports::AdcChannel;
use crate::error::SensorError;

const DATA_BITS: u32 = 24;
/// SCK high/low half-period.  The HX711 needs ≥ 0.2 µs; keep well below
/// the 60 µs that would power it down.
const CLK_HALF_PERIOD_US: u32 = 1;
/// SCK held high for longer than this powers the converter down.
const POWER_DOWN_HOLD_US: u32 = 80;
/// Settle time after SCK returns low.
const POWER_UP_SETTLE_US: u32 = 60;

/// Input channel and gain for the next conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gain {
    /// Channel A, gain 128.
    A128,
    /// Channel B, gain 32.
    B32,
    /// Channel A, gain 64.
    A64,
}

impl Gain {
    /// SCK pulses after the 24 data bits.
    pub fn extra_pulses(self) -> u32 {
        match self {
            Self::A128 => 1,
            Self::B32 => 2,
            Self::A64 => 3,
        }
    }
}

pub struct Hx711<SCK, DOUT, D> {
    sck: SCK,
    dout: DOUT,
    delay: D,
    gain: Gain,
    poll_interval_us: u32,
    powered_up: bool,
}

impl<SCK, DOUT, D> Hx711<SCK, DOUT, D>
where
    SCK: OutputPin,
    DOUT: InputPin,
    D: DelayNs,
{
    /// Takes ownership of the pins and drives SCK low, which also powers
    /// the converter up.
    pub fn new(
        sck: SCK,
        dout: DOUT,
        delay: D,
        gain: Gain,
        poll_interval_us: u32,
    ) -> Result<Self, SensorError> {
        let mut hx = Self {
            sck,
            dout,
            delay,
            gain,
            poll_interval_us,
            powered_up: false,
        };
        hx.power_up()?;
        Ok(hx)
    }

    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Select a new channel/gain.  One conversion is clocked out (and
    /// discarded) so that the selection applies to the next reading.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), SensorError> {
        self.gain = gain;
        while !self.is_ready()? {
            self.yield_now();
        }
        let _ = self.read_conversion()?;
        debug!("HX711 gain set to {:?}", gain);
        Ok(())
    }

    pub fn is_powered_up(&self) -> bool {
        self.powered_up
    }

    pub fn power_down(&mut self) -> Result<(), SensorError> {
        self.clock_low()?;
        self.clock_high()?;
        self.delay.delay_us(POWER_DOWN_HOLD_US);
        self.powered_up = false;
        Ok(())
    }

    /// Returns to the gain last selected; the first conversion after
    /// power-up uses channel A / 128 on the device itself.
    pub fn power_up(&mut self) -> Result<(), SensorError> {
        self.clock_low()?;
        self.delay.delay_us(POWER_UP_SETTLE_US);
        self.powered_up = true;
        Ok(())
    }

    /// Release the pins.
    pub fn release(self) -> (SCK, DOUT, D) {
        (self.sck, self.dout, self.delay)
    }

    fn pulse(&mut self) -> Result<(), SensorError> {
        self.clock_high()?;
        self.delay.delay_us(CLK_HALF_PERIOD_US);
        self.clock_low()?;
        self.delay.delay_us(CLK_HALF_PERIOD_US);
        Ok(())
    }

    fn clock_high(&mut self) -> Result<(), SensorError> {
        self.sck.set_high().map_err(|_| SensorError::ClockPinWrite)
    }

    fn clock_low(&mut self) -> Result<(), SensorError> {
        self.sck.set_low().map_err(|_| SensorError::ClockPinWrite)
    }
}

impl<SCK, DOUT, D> AdcChannel for Hx711<SCK, DOUT, D>
where
    SCK: OutputPin,
    DOUT: InputPin,
    D: DelayNs,
{
    fn is_ready(&mut self) -> Result<bool, SensorError> {
        self.dout.is_low().map_err(|_| SensorError::DataPinRead)
    }

    fn read_conversion(&mut self) -> Result<i32, SensorError> {
        if !self.powered_up {
            self.power_up()?;
        }

        let mut word: u32 = 0;
        for _ in 0..DATA_BITS {
            self.clock_high()?;
            self.delay.delay_us(CLK_HALF_PERIOD_US);
            let bit = self.dout.is_high().map_err(|_| SensorError::DataPinRead)?;
            self.clock_low()?;
            self.delay.delay_us(CLK_HALF_PERIOD_US);
            word = (word << 1) | u32::from(bit);
        }

        for _ in 0..self.gain.extra_pulses() {
            self.pulse()?;
        }

        Ok(sign_extend_24(word))
    }

    fn yield_now(&mut self) {
        self.delay.delay_us(self.poll_interval_us);
    }
}

/// Interpret the low 24 bits as two's complement.
pub fn sign_extend_24(word: u32) -> i32 {
    ((word << 8) as i32) >> 8
}
