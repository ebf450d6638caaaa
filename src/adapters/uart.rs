//! UART adapter — the operator's command channel on the device.
//!
//! Wraps the two halves of an ESP-IDF `UartDriver`: the receive half
//! implements [`SerialPort`], the transmit half implements `io::Write` so
//! it can back a text or JSON report sink.

use std::io;

use esp_idf_hal::sys::configTICK_RATE_HZ;
use esp_idf_hal::uart::{UartRxDriver, UartTxDriver};

use crate::app::ports::SerialPort;

/// One `read_byte` waits at most one FreeRTOS tick.  A zero-tick timeout
/// would not block at all.
const READ_TIMEOUT_TICKS: u32 = 1;

pub struct UartSerial<'a, 'd> {
    rx: &'a UartRxDriver<'d>,
}

impl<'a, 'd> UartSerial<'a, 'd> {
    pub fn new(rx: &'a UartRxDriver<'d>) -> Self {
        Self { rx }
    }
}

/// Length of `ticks` FreeRTOS ticks in whole milliseconds, at least 1.
fn ticks_to_ms(ticks: u32, tick_rate_hz: u32) -> u32 {
    (ticks.saturating_mul(1000) / tick_rate_hz.max(1)).max(1)
}

impl SerialPort for UartSerial<'_, '_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.rx.read(&mut buf, READ_TIMEOUT_TICKS) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn read_timeout_ms(&self) -> u32 {
        ticks_to_ms(READ_TIMEOUT_TICKS, configTICK_RATE_HZ)
    }
}

pub struct UartWriter<'a, 'd> {
    tx: &'a UartTxDriver<'d>,
}

impl<'a, 'd> UartWriter<'a, 'd> {
    pub fn new(tx: &'a UartTxDriver<'d>) -> Self {
        Self { tx }
    }
}

impl io::Write for UartWriter<'_, '_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx.write(buf).map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
