//! Serial text sink
//!
//! Adapts a [`UartTx`] to `core::fmt::Write`, translating `\n` into `\r\n`
//! for serial terminals.

use core::fmt;

use crate::uart::UartTx;

/// `core::fmt::Write` over a UART transmitter
pub struct SerialWriter<T: UartTx> {
    tx: T,
    errors: u32,
}

impl<T: UartTx> SerialWriter<T> {
    /// Wrap a transmitter
    pub fn new(tx: T) -> Self {
        Self { tx, errors: 0 }
    }

    /// Transmit errors seen so far
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Release the transmitter
    pub fn release(self) -> T {
        self.tx
    }

    fn send(&mut self, data: &[u8]) -> fmt::Result {
        self.tx.write_blocking(data).map_err(|_| {
            self.errors = self.errors.wrapping_add(1);
            fmt::Error
        })
    }
}

impl<T: UartTx> fmt::Write for SerialWriter<T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            self.send(first.as_bytes())?;
        }
        for line in lines {
            self.send(b"\r\n")?;
            self.send(line.as_bytes())?;
        }
        Ok(())
    }
}
