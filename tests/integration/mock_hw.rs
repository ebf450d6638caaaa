//! Mock hardware for integration tests.
//!
//! Scripted acquisition channel, byte-queue serial port, recording report
//! sink, and a pin-level HX711 simulator for the bit-banged driver.  No
//! real GPIO is touched.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use lanternscale::app::events::Report;
use lanternscale::app::ports::{AdcChannel, ReportSink, SerialPort};
use lanternscale::app::service::CommandLoop;
use lanternscale::config::InstrumentConfig;
use lanternscale::error::SensorError;
use lanternscale::instrument::WeighingInstrument;

// ── MockChannel ───────────────────────────────────────────────

/// Serves queued samples, then keeps repeating `level`.
pub struct MockChannel {
    pub queued: VecDeque<i32>,
    pub level: i32,
    /// Not-ready polls before each conversion.
    pub not_ready_polls: u32,
    pub never_ready: bool,
    pub conversions: u32,
    pub yields: u32,
    pending_not_ready: u32,
}

#[allow(dead_code)]
impl MockChannel {
    pub fn constant(level: i32) -> Self {
        Self {
            queued: VecDeque::new(),
            level,
            not_ready_polls: 0,
            never_ready: false,
            conversions: 0,
            yields: 0,
            pending_not_ready: 0,
        }
    }

    pub fn scripted(samples: &[i32]) -> Self {
        let mut ch = Self::constant(samples.last().copied().unwrap_or(0));
        ch.queued = samples.iter().copied().collect();
        ch
    }

    pub fn dead() -> Self {
        let mut ch = Self::constant(0);
        ch.never_ready = true;
        ch
    }
}

impl AdcChannel for MockChannel {
    fn is_ready(&mut self) -> Result<bool, SensorError> {
        if self.never_ready {
            return Ok(false);
        }
        if self.pending_not_ready < self.not_ready_polls {
            self.pending_not_ready += 1;
            return Ok(false);
        }
        Ok(true)
    }

    fn read_conversion(&mut self) -> Result<i32, SensorError> {
        self.pending_not_ready = 0;
        self.conversions += 1;
        Ok(self.queued.pop_front().unwrap_or(self.level))
    }

    fn yield_now(&mut self) {
        self.yields += 1;
    }
}

// ── MockSerial ────────────────────────────────────────────────

pub struct MockSerial {
    pub rx: VecDeque<u8>,
    /// Reported per-read wait; nothing actually blocks.
    pub read_timeout_ms: u32,
}

impl Default for MockSerial {
    fn default() -> Self {
        Self {
            rx: VecDeque::new(),
            read_timeout_ms: 1,
        }
    }
}

#[allow(dead_code)]
impl MockSerial {
    pub fn with(bytes: &[u8]) -> Self {
        Self {
            rx: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }
}

impl SerialPort for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn read_timeout_ms(&self) -> u32 {
        self.read_timeout_ms
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<Report>,
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

// ── Helpers ───────────────────────────────────────────────────

#[allow(dead_code)]
pub fn command_loop(channel: MockChannel, config: &InstrumentConfig) -> CommandLoop<MockChannel> {
    CommandLoop::new(WeighingInstrument::new(channel, config), config)
}

/// Poll until the serial queue is empty, then complete any pending argument.
#[allow(dead_code)]
pub fn drain(
    command_loop: &mut CommandLoop<MockChannel>,
    serial: &mut MockSerial,
    sink: &mut impl ReportSink,
) {
    while !serial.rx.is_empty() {
        command_loop.poll(serial, sink);
    }
    command_loop.flush(sink);
}

// ── HX711 pin-level simulator ─────────────────────────────────

/// Device side of the two-wire interface.  DOUT is low while a conversion
/// is queued; each SCK rising edge shifts out the next bit, MSB first.
#[derive(Default)]
pub struct Hx711Sim {
    pub conversions: VecDeque<i32>,
    /// SCK pulses seen for each completed transfer.
    pub pulses_per_read: Vec<u32>,
    pub sck_high: bool,
    word: Option<u32>,
    edges: u32,
}

impl Hx711Sim {
    fn rising(&mut self) {
        self.sck_high = true;
        if self.word.is_none() {
            let Some(next) = self.conversions.pop_front() else {
                return;
            };
            self.word = Some(next as u32 & 0x00FF_FFFF);
            self.edges = 0;
        }
        self.edges += 1;
    }

    fn falling(&mut self) {
        self.sck_high = false;
    }

    fn dout_high(&mut self) -> bool {
        if let Some(word) = self.word {
            if (1..=24).contains(&self.edges) {
                return (word >> (24 - self.edges)) & 1 == 1;
            }
            if !self.sck_high {
                // Data and gain pulses done; transfer complete.
                self.pulses_per_read.push(self.edges);
                self.word = None;
                self.edges = 0;
            }
        }
        self.conversions.is_empty()
    }
}

pub type SharedSim = Rc<RefCell<Hx711Sim>>;

pub struct SimSck(pub SharedSim);
pub struct SimDout(pub SharedSim);

impl ErrorType for SimSck {
    type Error = Infallible;
}

impl OutputPin for SimSck {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().falling();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().rising();
        Ok(())
    }
}

impl ErrorType for SimDout {
    type Error = Infallible;
}

impl InputPin for SimDout {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow_mut().dout_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow_mut().dout_high())
    }
}

/// Counts requested delay instead of sleeping.
#[derive(Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── Faulty pin ────────────────────────────────────────────────

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A pin whose every access fails.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}
