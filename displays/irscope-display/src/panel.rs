//! Panel trait

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use irscope_core::traits::DisplayError;

/// A monochrome pixel buffer backed by (or standing in for) a physical panel
///
/// Drawing goes through `embedded-graphics`; nothing is sent to the panel
/// until [`flush`](Panel::flush).
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Turn every buffered pixel off
    fn clear_buffer(&mut self);

    /// Send the buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
