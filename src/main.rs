//! Lantern scale firmware — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                  │
//! │                                                           │
//! │  Hx711 (AdcChannel)   UartSerial (SerialPort)             │
//! │  Text/Json/LogReportSink (ReportSink)                     │
//! │                                                           │
//! │  ──────────────── Port Trait Boundary ───────────────     │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────┐      │
//! │  │      CommandLoop (pure logic)                   │      │
//! │  │      CommandParser · WeighingInstrument         │      │
//! │  └─────────────────────────────────────────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use log::info;

use lanternscale::adapters::json_sink::JsonReportSink;
use lanternscale::adapters::log_sink::LogReportSink;
use lanternscale::adapters::text_sink::TextReportSink;
use lanternscale::adapters::uart::{UartSerial, UartWriter};
use lanternscale::app::ports::{AdcChannel, ReportSink, SerialPort};
use lanternscale::app::service::CommandLoop;
use lanternscale::config::{InstrumentConfig, ReportFormat};
use lanternscale::drivers::hx711::Hx711;
use lanternscale::instrument::WeighingInstrument;
use lanternscale::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Lantern scale v{}", env!("CARGO_PKG_VERSION"));

    let config = InstrumentConfig::default();
    config.validate().context("instrument config")?;

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let sck = PinDriver::output(peripherals.pins.gpio4)?;
    let dout = PinDriver::input(peripherals.pins.gpio5)?;
    let hx711 = Hx711::new(sck, dout, Ets, config.gain, config.poll_interval_us)
        .context("HX711 power-up")?;
    info!(
        "HX711 on SCK=GPIO{} DOUT=GPIO{} ({:?})",
        pins::HX711_SCK_GPIO,
        pins::HX711_DOUT_GPIO,
        config.gain
    );

    let uart_config = uart::config::Config::new().baudrate(Hertz(pins::UART_BAUD));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )?;
    let (tx, rx) = uart.split();
    let mut serial = UartSerial::new(rx);
    let writer = UartWriter::new(tx);
    info!(
        "Commands on UART{} TX=GPIO{} RX=GPIO{} @ {} baud",
        pins::COMMAND_UART,
        pins::UART_TX_GPIO,
        pins::UART_RX_GPIO,
        pins::UART_BAUD
    );

    // ── 3. Instrument + command loop ──────────────────────────
    let instrument = WeighingInstrument::new(hx711, &config);
    let mut command_loop = CommandLoop::new(instrument, &config);

    match config.report_format {
        ReportFormat::Text => serve(
            &mut command_loop,
            &mut serial,
            &mut TextReportSink::new(writer, config.units_decimals),
        ),
        ReportFormat::Json => serve(&mut command_loop, &mut serial, &mut JsonReportSink::new(writer)),
        ReportFormat::Log => serve(&mut command_loop, &mut serial, &mut LogReportSink::new()),
    }
}

/// Startup diagnostic, then the endless command loop.
fn serve<C: AdcChannel>(
    command_loop: &mut CommandLoop<C>,
    serial: &mut impl SerialPort,
    sink: &mut impl ReportSink,
) -> ! {
    command_loop.run_startup(sink);
    command_loop.run(serial, sink)
}
