//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements   | Connects to                    |
//! |--------------|--------------|--------------------------------|
//! | `text_sink`  | ReportSink   | Any `io::Write` (UART, stdout) |
//! | `json_sink`  | ReportSink   | Any `io::Write`, JSON lines    |
//! | `log_sink`   | ReportSink   | `log` facade                   |
//! | `uart`       | SerialPort   | ESP-IDF UART (device only)     |
//!
//! The `AdcChannel` port is implemented by [`crate::drivers::hx711`].

pub mod json_sink;
pub mod log_sink;
pub mod text_sink;
#[cfg(feature = "espidf")]
pub mod uart;
