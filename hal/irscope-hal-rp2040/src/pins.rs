//! Dynamic pin allocation for config-driven hardware setup
//!
//! The receive pin comes from `recorder.toml`, so it is taken by number at
//! runtime. The serial and display buses are wired to fixed pins; those are
//! split off into [`BoardPeripherals`] and reported as reserved by the bank.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{I2C0, PIN_0, PIN_4, PIN_5, UART0};
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIOs
pub const PIN_COUNT: usize = 30;

/// UART0 TX
pub const UART_TX_PIN: u8 = 0;

/// I2C0 SDA
pub const I2C_SDA_PIN: u8 = 4;

/// I2C0 SCL
pub const I2C_SCL_PIN: u8 = 5;

const RESERVED: [u8; 3] = [UART_TX_PIN, I2C_SDA_PIN, I2C_SCL_PIN];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin wired to the serial or display bus
    Reserved,
}

/// Peripherals with fixed board wiring
pub struct BoardPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub uart_tx: Peri<'static, PIN_0>,
    pub i2c0: Peri<'static, I2C0>,
    pub sda: Peri<'static, PIN_4>,
    pub scl: Peri<'static, PIN_5>,
}

/// Pin bank that holds the free GPIO pins and hands them out by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; PIN_COUNT],
}

impl PinBank {
    /// Split the peripherals into the pin bank and the fixed board wiring
    pub fn split(p: Peripherals) -> (Self, BoardPeripherals) {
        let bank = Self {
            pins: [
                None, // UART0 TX
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                None, // I2C0 SDA
                None, // I2C0 SCL
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let board = BoardPeripherals {
            uart0: p.UART0,
            uart_tx: p.PIN_0,
            i2c0: p.I2C0,
            sda: p.PIN_4,
            scl: p.PIN_5,
        };
        (bank, board)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        check(pin_num)?;
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

/// Range and reservation check
fn check(pin_num: u8) -> Result<(), PinError> {
    if usize::from(pin_num) >= PIN_COUNT {
        Err(PinError::InvalidPin)
    } else if RESERVED.contains(&pin_num) {
        Err(PinError::Reserved)
    } else {
        Ok(())
    }
}
