//! IRscope - IR Code Recorder Firmware
//!
//! Main firmware binary for RP2040 boards with a demodulating IR receiver,
//! an SSD1306 OLED on I2C0 and a serial console on UART0. Every decoded
//! code is shown on the panel and written to serial as a full diagnostic
//! record.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use irscope_core::config::{parse_config, ParseError, RecorderConfig};
use irscope_core::traits::DisplayError;
use irscope_core::{Recorder, SinkError, TickOutcome};
use irscope_display::{Ssd1306, TextCanvas};
use irscope_drivers::{CaptureEngine, DecoderConfig};
use irscope_hal::{I2cConfig, SerialWriter, UartConfig};
use irscope_hal_rp2040::{BlockingUartTx, BoardPeripherals, IrReceiver, PinBank, PinError};

use crate::channels::SignalSource;

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit recorder.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../recorder.toml");

/// Poll loop period in milliseconds
const POLL_INTERVAL_MS: u64 = 10;

type Display = TextCanvas<Ssd1306<I2c<'static, I2C0, Blocking>>>;
type Serial = SerialWriter<BlockingUartTx>;
type IrRecorder = Recorder<CaptureEngine<SignalSource>, Display, Serial>;

/// Unrecoverable bring-up failures
#[derive(Debug, Clone, Copy, Format)]
enum InitError {
    /// Embedded configuration rejected
    Config(ParseError),
    /// Receive pin unavailable
    Pin(PinError),
    /// Panel did not answer on I2C
    Display(DisplayError),
    /// Task arena exhausted
    Spawn,
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("IRscope firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut pins, board) = PinBank::split(p);
    info!("Peripherals initialized");

    let mut recorder = match bring_up(&spawner, &mut pins, board) {
        Ok(recorder) => recorder,
        Err(e) => halt(e),
    };

    if let Err(e) = recorder.show_splash() {
        warn!("Splash failed: {:?}", e);
    }
    if let Err(e) = recorder.announce() {
        warn!("Banner failed: {:?}", e);
    }

    info!("Recorder running, waiting for IR input");
    poll_loop(&mut recorder).await
}

/// Parse configuration, set up both sinks and start the capture task
fn bring_up(
    spawner: &Spawner,
    pins: &mut PinBank,
    board: BoardPeripherals,
) -> Result<IrRecorder, InitError> {
    let config: RecorderConfig = parse_config(EMBEDDED_CONFIG).map_err(InitError::Config)?;
    info!(
        "Config loaded: receiver gpio{}, window {}ms, panel {}x{} @ {:#x}",
        config.receiver.pin.pin,
        config.presentation.clear_window_ms,
        config.display.width,
        config.display.height,
        config.display.i2c_address
    );
    if config.receiver.has_custom_tolerance() {
        warn!(
            "Timing tolerance set to {}%",
            config.receiver.tolerance_percent
        );
    }

    let receive_pin = pins
        .take(config.receiver.pin.pin)
        .map_err(InitError::Pin)?;
    let receiver = IrReceiver::new(receive_pin, &config.receiver.pin, config.receiver.timeout_ms);

    let i2c_config = I2cConfig::new(config.display.i2c_frequency);
    let mut rp_i2c_config = i2c::Config::default();
    rp_i2c_config.frequency = i2c_config.frequency;
    let i2c = I2c::new_blocking(board.i2c0, board.scl, board.sda, rp_i2c_config);

    let mut panel = Ssd1306::new(
        i2c,
        config.display.i2c_address,
        u32::from(config.display.width),
        u32::from(config.display.height),
    );
    panel.init().map_err(InitError::Display)?;
    info!("OLED initialized");
    let display = TextCanvas::new(panel, config.presentation.overflow);

    let uart = BlockingUartTx::new(
        board.uart0,
        board.uart_tx,
        &UartConfig::new(config.serial.baudrate),
    );
    let serial = SerialWriter::new(uart);
    info!("Serial console at {} baud", config.serial.baudrate);

    spawner
        .spawn(tasks::capture_task(
            receiver,
            config.receiver.capture_buffer_size,
        ))
        .map_err(|_| InitError::Spawn)?;

    let engine = CaptureEngine::new(SignalSource, DecoderConfig::from(&config.receiver));
    Ok(Recorder::new(engine, display, serial, &config))
}

/// Cooperative poll loop: one decode-engine poll per tick
async fn poll_loop(recorder: &mut IrRecorder) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut overflows = 0;
    let mut serial_errors = 0;
    let mut dropped = 0;

    loop {
        ticker.next().await;

        match recorder.tick(Instant::now().as_millis()) {
            Ok(TickOutcome::Idle) => {}
            Ok(TickOutcome::MarkerDrawn) => debug!("Ready marker drawn"),
            Ok(TickOutcome::Presented { cleared }) => {
                let stats = recorder.stats();
                info!("Code presented (#{}, cleared={})", stats.decoded, cleared);
            }
            Err(SinkError::Display(e)) => debug!("Display error: {:?}", e),
            Err(SinkError::Text) => debug!("Serial write failed"),
        }

        let stats = recorder.stats();
        if stats.overflows != overflows {
            overflows = stats.overflows;
            warn!("Capture buffer overflowed; raw timings truncated");
        }

        let errors = recorder.text().errors();
        if errors != serial_errors {
            serial_errors = errors;
            warn!("Serial transmit errors: {}", errors);
        }

        let noise = recorder.engine_mut().dropped();
        if noise != dropped {
            dropped = noise;
            trace!("Captures dropped as noise: {}", dropped);
        }
    }
}

/// Log a fatal bring-up error and stop
fn halt(error: InitError) -> ! {
    error!("Initialization failed: {:?}", error);
    loop {
        cortex_m::asm::wfi();
    }
}
