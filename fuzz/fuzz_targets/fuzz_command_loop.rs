//! Fuzz target: `CommandLoop` end to end
//!
//! Drives arbitrary serial input into a command loop over a synthetic
//! converter and checks:
//! - No panics under any byte sequence
//! - The scale factor stays finite and non-zero
//!
//! cargo fuzz run fuzz_command_loop

#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lanternscale::app::events::Report;
use lanternscale::app::ports::{AdcChannel, ReportSink, SerialPort};
use lanternscale::app::service::CommandLoop;
use lanternscale::config::InstrumentConfig;
use lanternscale::error::SensorError;
use lanternscale::instrument::WeighingInstrument;

/// Ramp converter, fails to become ready every seventh poll.
struct Ramp {
    next: i32,
    polls: u32,
}

impl AdcChannel for Ramp {
    fn is_ready(&mut self) -> Result<bool, SensorError> {
        self.polls = self.polls.wrapping_add(1);
        Ok(self.polls % 7 != 0)
    }

    fn read_conversion(&mut self) -> Result<i32, SensorError> {
        self.next = (self.next + 997) % (1 << 23);
        Ok(self.next)
    }
}

struct Bytes(VecDeque<u8>);

impl SerialPort for Bytes {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }

    fn read_timeout_ms(&self) -> u32 {
        1
    }
}

struct Discard;

impl ReportSink for Discard {
    fn emit(&mut self, _report: &Report) {}
}

fuzz_target!(|data: &[u8]| {
    let config = InstrumentConfig {
        tare_samples: 2,
        command_samples: 2,
        ready_timeout_polls: Some(4),
        argument_idle_ms: Some(2),
        ..InstrumentConfig::default()
    };
    let instrument = WeighingInstrument::new(Ramp { next: 0, polls: 0 }, &config);
    let mut command_loop = CommandLoop::new(instrument, &config);
    let mut serial = Bytes(data.iter().copied().collect());

    while !serial.0.is_empty() {
        command_loop.poll(&mut serial, &mut Discard);
        let scale = command_loop.instrument().scale();
        assert!(scale.is_finite() && scale != 0.0);
    }
    command_loop.flush(&mut Discard);
});
