//! 1-bit page-organised frame buffer
//!
//! Same layout as SSD1306 GDDRAM: the panel is split into 8-pixel-tall
//! pages, each byte is one column of a page with the LSB at the top.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use irscope_core::traits::DisplayError;

use crate::panel::Panel;

/// Largest supported panel width
pub const MAX_WIDTH: u32 = 128;

/// Largest supported panel height
pub const MAX_HEIGHT: u32 = 64;

/// Buffer size in bytes
pub const BUFFER_LEN: usize = (MAX_WIDTH * MAX_HEIGHT / 8) as usize;

/// In-memory monochrome frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_LEN],
    width: u32,
    height: u32,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(MAX_WIDTH, MAX_HEIGHT)
    }
}

impl Framebuffer {
    /// Create a blank buffer, clamped to 128x64
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
            width: width.min(MAX_WIDTH),
            height: height.min(MAX_HEIGHT),
        }
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> usize {
        self.height.div_ceil(8) as usize
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> &[u8] {
        let start = page * MAX_WIDTH as usize;
        &self.buffer[start..start + self.width as usize]
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Read one pixel; out of bounds reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some((idx, bit)) => self.buffer[idx] & bit != 0,
            None => false,
        }
    }

    /// Write one pixel; out of bounds writes are discarded
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((idx, bit)) = self.index(x, y) {
            if on {
                self.buffer[idx] |= bit;
            } else {
                self.buffer[idx] &= !bit;
            }
        }
    }

    /// Count lit pixels inside a rectangle
    pub fn lit_in(&self, x: i32, y: i32, width: u32, height: u32) -> usize {
        let mut count = 0;
        for py in y..y + height as i32 {
            for px in x..x + width as i32 {
                if self.pixel(px, py) {
                    count += 1;
                }
            }
        }
        count
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * MAX_WIDTH as usize + x, 1 << (y % 8)))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl Panel for Framebuffer {
    fn clear_buffer(&mut self) {
        self.clear();
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Framebuffer({}x{})", self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_layout() {
        let mut fb = Framebuffer::default();
        fb.set_pixel(3, 9, true);
        assert!(fb.pixel(3, 9));
        assert_eq!(fb.page(1)[3], 0b0000_0010);
    }

    #[test]
    fn test_out_of_bounds_discarded() {
        let mut fb = Framebuffer::default();
        fb.set_pixel(128, 0, true);
        fb.set_pixel(0, 64, true);
        fb.set_pixel(-1, 5, true);
        assert_eq!(fb.lit_in(0, 0, 128, 64), 0);
    }

    #[test]
    fn test_short_panel() {
        let fb = Framebuffer::new(128, 32);
        assert_eq!(fb.pages(), 4);
        assert_eq!(fb.size(), Size::new(128, 32));
    }
}
