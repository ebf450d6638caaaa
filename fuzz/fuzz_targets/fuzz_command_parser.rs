//! Fuzz target: `CommandParser`
//!
//! Feeds arbitrary byte streams through the parser, with a zero byte
//! standing in for an idle poll, and checks:
//! - No panics under any byte sequence
//! - A `Calibrate` value is always finite
//! - `flush` always leaves the parser idle
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use lanternscale::app::commands::{Command, CommandParser, Parsed};

fn check(parsed: &Parsed) {
    if let Parsed::Command(Command::Calibrate(v)) = parsed {
        assert!(v.is_finite(), "non-finite scale {v} accepted");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut parser = CommandParser::new();
    for &b in data {
        if b == 0 {
            if let Some(p) = parser.idle(Some(3)) {
                check(&p);
            }
            continue;
        }
        for p in &parser.feed(b) {
            check(p);
        }
    }
    if let Some(p) = parser.flush() {
        check(&p);
    }
    assert!(!parser.is_collecting());
});
