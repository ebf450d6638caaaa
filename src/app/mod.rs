//! Application core — command protocol and loop, zero I/O.
//!
//! All interaction with the transducer and the operator happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
