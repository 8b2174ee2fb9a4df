//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 (or 128x32) SSD1306-based OLED displays via I2C, using
//! the internal charge pump. Drawing happens in a [`Framebuffer`]; `flush`
//! streams the whole buffer in horizontal addressing mode.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;
use irscope_core::traits::DisplayError;

use crate::framebuffer::Framebuffer;
use crate::panel::Panel;

/// Bytes of pixel data per I2C transfer
const CHUNK_LEN: usize = 32;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_ADDRESSING_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

/// Control byte: command stream
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: data stream
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    buffer: Framebuffer,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver for a panel at the given 7-bit address
    pub fn new(i2c: I2C, address: u8, width: u32, height: u32) -> Self {
        Self {
            i2c,
            address,
            buffer: Framebuffer::new(width, height),
        }
    }

    /// Initialize the display and blank it
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let size = self.buffer.size();
        let mux = (size.height - 1) as u8;
        let com_pins = if size.height == 64 { 0x12 } else { 0x02 };

        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            mux,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_ADDRESSING_MODE,
            0x00,                  // Horizontal
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DEACTIVATE_SCROLL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.buffer.clear();
        self.flush()
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Communication)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<I2C: I2c> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer.draw_iter(pixels)
    }
}

impl<I2C: I2c> Panel for Ssd1306<I2C> {
    fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let pages = self.buffer.pages();
        let last_column = (self.buffer.size().width - 1) as u8;

        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            last_column,
            cmd::SET_PAGE_ADDR,
            0,
            (pages - 1) as u8,
        ] {
            self.command(c)?;
        }

        let mut data = [0u8; CHUNK_LEN + 1];
        data[0] = CONTROL_DATA;
        for page in 0..pages {
            for chunk in self.buffer.page(page).chunks(CHUNK_LEN) {
                data[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c
                    .write(self.address, &data[..=chunk.len()])
                    .map_err(|_| DisplayError::Communication)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    /// I2C bus that records every write
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut display = Ssd1306::new(MockI2c::default(), 0x3C, 128, 64);
        display.init().unwrap();

        let i2c = display.release();
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == 0x3C));
        assert_eq!(i2c.writes[0].1, [CONTROL_COMMAND, cmd::DISPLAY_OFF]);
        assert!(i2c
            .writes
            .iter()
            .any(|(_, bytes)| bytes == &[CONTROL_COMMAND, cmd::DISPLAY_ON]));
    }

    #[test]
    fn test_flush_streams_whole_buffer() {
        let mut display = Ssd1306::new(MockI2c::default(), 0x3C, 128, 64);
        Pixel(Point::new(0, 0), BinaryColor::On)
            .draw(&mut display)
            .unwrap();
        display.flush().unwrap();

        let i2c = display.release();
        let data: Vec<u8> = i2c
            .writes
            .iter()
            .filter(|(_, bytes)| bytes[0] == CONTROL_DATA)
            .flat_map(|(_, bytes)| bytes[1..].iter().copied())
            .collect();
        assert_eq!(data.len(), 1024);
        assert_eq!(data[0], 0x01);
    }

    #[test]
    fn test_bus_error_reported() {
        let i2c = MockI2c {
            fail: true,
            ..Default::default()
        };
        let mut display = Ssd1306::new(i2c, 0x3C, 128, 64);
        assert_eq!(display.init(), Err(DisplayError::Communication));
    }
}
