//! Configuration structures
//!
//! Consumed once at bring-up; nothing here changes at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used by the decode engine when none is configured (percent)
pub const DEFAULT_TOLERANCE_PERCENT: u8 = 25;

/// Largest capture buffer the engine can hold (mark/space entries)
pub const MAX_CAPTURE_SIZE: u16 = 512;

/// Smallest usable unknown-packet threshold (entries)
pub const MIN_UNKNOWN_SIZE: u16 = 3;

/// Default clear window in milliseconds
pub const DEFAULT_CLEAR_WINDOW_MS: u32 = 2000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Active-low input with pull-up, the usual wiring for demodulating
    /// IR receiver modules
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// IR receiver and decode engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverConfig {
    /// Receiver output pin
    pub pin: PinConfig,
    /// Capture buffer size in mark/space entries
    pub capture_buffer_size: u16,
    /// Gap (ms) after the last edge that ends a message
    pub timeout_ms: u8,
    /// Smallest unrecognised capture worth reporting (entries)
    pub min_unknown_size: u16,
    /// Timing tolerance when matching protocol templates (percent)
    pub tolerance_percent: u8,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::active_low_pullup(14),
            capture_buffer_size: MAX_CAPTURE_SIZE,
            timeout_ms: 90,
            min_unknown_size: 12,
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
        }
    }
}

impl ReceiverConfig {
    /// Check if the tolerance differs from the engine default
    pub fn has_custom_tolerance(&self) -> bool {
        self.tolerance_percent != DEFAULT_TOLERANCE_PERCENT
    }
}

/// OLED panel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
    /// I2C clock frequency in Hz
    pub i2c_frequency: u32,
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            i2c_frequency: 400_000,
            width: 128,
            height: 64,
        }
    }
}

/// What to do when text runs past the bottom edge of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Keep drawing; pixels below the panel are discarded
    #[default]
    Clip,
    /// Restart at the top, blanking each line band before drawing
    Wrap,
    /// Drop the oldest lines and redraw the rest from the top
    TruncateOldest,
}

/// Clear-window and presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PresentationConfig {
    /// Events further apart than this start a fresh screen (ms)
    pub clear_window_ms: u32,
    /// Side length of the idle "ready" marker in pixels
    pub marker_size: u8,
    /// Bottom-edge overflow handling
    pub overflow: OverflowPolicy,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            clear_window_ms: DEFAULT_CLEAR_WINDOW_MS,
            marker_size: 2,
            overflow: OverflowPolicy::Clip,
        }
    }
}

/// Serial text sink settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// Complete recorder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecorderConfig {
    /// `[receiver]`: IR input and decode engine
    pub receiver: ReceiverConfig,
    /// `[display]`: OLED panel
    pub display: DisplayConfig,
    /// `[presentation]`: clear window, marker and overflow
    pub presentation: PresentationConfig,
    /// `[serial]`: text sink
    pub serial: SerialConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number outside 0-29
    InvalidPin,
    /// Capture buffer empty or larger than the engine supports
    InvalidCaptureSize,
    /// Message timeout of zero
    InvalidTimeout,
    /// Unknown-packet threshold below three entries
    InvalidUnknownSize,
    /// Tolerance above 100%
    InvalidTolerance,
    /// Zero-sized panel
    InvalidGeometry,
    /// Marker of zero size or larger than the panel
    InvalidMarker,
    /// Zero baud rate
    InvalidBaudrate,
}

impl RecorderConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check ranges the parser cannot enforce on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.receiver.pin.pin >= 30 {
            return Err(ConfigError::InvalidPin);
        }
        if self.receiver.capture_buffer_size == 0
            || self.receiver.capture_buffer_size > MAX_CAPTURE_SIZE
        {
            return Err(ConfigError::InvalidCaptureSize);
        }
        if self.receiver.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.receiver.min_unknown_size < MIN_UNKNOWN_SIZE {
            return Err(ConfigError::InvalidUnknownSize);
        }
        if self.receiver.tolerance_percent > 100 {
            return Err(ConfigError::InvalidTolerance);
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::InvalidGeometry);
        }
        let marker = self.presentation.marker_size as u16;
        if marker == 0 || marker > self.display.width || marker > self.display.height {
            return Err(ConfigError::InvalidMarker);
        }
        if self.serial.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }
}
