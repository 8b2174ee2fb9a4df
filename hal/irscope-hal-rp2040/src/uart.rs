//! Blocking UART transmitter
//!
//! The recorder only ever writes to the serial port, and only from the poll
//! loop, so a blocking TX half is enough.

use embassy_rp::peripherals::{PIN_0, UART0};
use embassy_rp::uart::{self, Blocking, UartTx as RpUartTx};
use embassy_rp::Peri;
use irscope_hal::uart::{UartConfig, UartTx};

/// UART0 transmitter implementing [`UartTx`]
pub struct BlockingUartTx {
    tx: RpUartTx<'static, Blocking>,
}

impl BlockingUartTx {
    /// Set up UART0 TX on GPIO0 with 8N1 framing
    pub fn new(uart: Peri<'static, UART0>, tx: Peri<'static, PIN_0>, config: &UartConfig) -> Self {
        let mut rp_config = uart::Config::default();
        rp_config.baudrate = config.baudrate;
        Self {
            tx: RpUartTx::new_blocking(uart, tx, rp_config),
        }
    }
}

impl UartTx for BlockingUartTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }
}
