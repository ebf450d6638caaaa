//! Transducer drivers.

pub mod hx711;
