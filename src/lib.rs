//! Thrust-bench weighing instrument library.
//!
//! Exposes the pure-logic modules (instrument, command protocol, report
//! sinks, HX711 driver) for host-side testing.  ESP-IDF-specific code is
//! guarded by the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod instrument;
pub mod pins;
