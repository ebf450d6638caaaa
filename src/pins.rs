//! GPIO / peripheral pin assignments for the thrust-bench board.
//!
//! Single source of truth for the wiring.  `main.rs` takes the matching
//! typed pins from `Peripherals`; keep the two in step.

// ---------------------------------------------------------------------------
// HX711 load-cell amplifier
// ---------------------------------------------------------------------------

/// Digital output: serial clock.  Held high > 60 µs powers the HX711 down.
pub const HX711_SCK_GPIO: i32 = 4;
/// Digital input: data out.  LOW = conversion ready.
pub const HX711_DOUT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Command UART
// ---------------------------------------------------------------------------

/// UART peripheral carrying operator commands and reports.
pub const COMMAND_UART: u8 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
pub const UART_BAUD: u32 = 115_200;
