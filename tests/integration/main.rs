//! Host-side integration tests for the weighing instrument.
//!
//! `mock_hw` supplies the scripted converter, serial queue, recording sink
//! and the pin-level HX711 simulator; the other modules drive the library
//! through them.

mod mock_hw;
